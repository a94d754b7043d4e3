//! Statement text for the three calls the app makes.
//!
//! Stage paths are spliced in as identifiers, so they are validated first.
//! Everything else goes through `quote_literal`.

use crate::EngineError;

/// Accepts `db.schema.stage[/sub/dir]`, with or without a leading `@`.
///
/// The stage name is an identifier; a subdirectory may also contain `-` but no
/// empty or `..` segments.
pub fn validate_stage_path(stage_path: &str) -> Result<&str, EngineError> {
    let path = stage_path.trim().trim_start_matches('@');
    let (stage, subdir) = match path.split_once('/') {
        Some((stage, "")) => (stage, None),
        Some((stage, subdir)) => (stage, Some(subdir.strip_suffix('/').unwrap_or(subdir))),
        None => (path, None),
    };
    let stage_ok = !stage.is_empty()
        && stage
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'));
    let subdir_ok = subdir.map_or(true, |subdir| {
        subdir.split('/').all(|segment| {
            !segment.is_empty()
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '-'))
        })
    });
    if stage_ok && subdir_ok {
        Ok(path)
    } else {
        Err(EngineError::InvalidStagePath(stage_path.to_string()))
    }
}

/// Splits a validated stage path into the bare stage name and the file path relative to it.
///
/// `GET_PRESIGNED_URL` and `TO_FILE` take the stage by name; any subdirectory belongs in the
/// relative path argument.
pub fn stage_file(stage_path: &str, file_name: &str) -> Result<(String, String), EngineError> {
    let path = validate_stage_path(stage_path)?;
    Ok(match path.split_once('/') {
        Some((stage, subdir)) if !subdir.is_empty() => {
            let subdir = subdir.trim_end_matches('/');
            (stage.to_string(), format!("{subdir}/{file_name}"))
        }
        Some((stage, _)) => (stage.to_string(), file_name.to_string()),
        None => (path.to_string(), file_name.to_string()),
    })
}

/// Single-quoted SQL string literal.
pub fn quote_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "''");
    format!("'{escaped}'")
}

pub fn list_statement(stage_path: &str) -> Result<String, EngineError> {
    let stage = validate_stage_path(stage_path)?;
    Ok(format!("LIST @{stage}"))
}

pub fn presigned_url_statement(
    stage_path: &str,
    file_name: &str,
    expiry_secs: u32,
) -> Result<String, EngineError> {
    let (stage, relative) = stage_file(stage_path, file_name)?;
    Ok(format!(
        "SELECT GET_PRESIGNED_URL(@{stage}, {}, {expiry_secs})",
        quote_literal(&relative)
    ))
}

pub fn complete_statement(
    model: &str,
    prompt: &str,
    stage_path: &str,
    file_name: &str,
) -> Result<String, EngineError> {
    let (stage, relative) = stage_file(stage_path, file_name)?;
    Ok(format!(
        "SELECT SNOWFLAKE.CORTEX.COMPLETE({}, {}, TO_FILE({}, {}))",
        quote_literal(model),
        quote_literal(prompt),
        quote_literal(&format!("@{stage}")),
        quote_literal(&relative)
    ))
}
