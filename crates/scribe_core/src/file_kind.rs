/// Extensions (lowercase) that are offered for extraction without the override checkbox.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"];

/// Lowercased text after the last `.`, or `""` when the name has no dot.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

pub fn is_image_file_name(file_name: &str) -> bool {
    let ext = file_extension(file_name);
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// MIME type used when embedding a preview; extension sniffing only.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    match file_extension(file_name).as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
