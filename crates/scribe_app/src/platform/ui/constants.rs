pub const PAGE_TITLE: &str = "Handwriting Text Extraction: Demo";
pub const SELECT_LABEL: &str = "Select an image file";
pub const FORCE_LABEL: &str = "Force extraction (if not an image file)";
pub const EXTRACT_BUTTON: &str = "Extract Text from Image";
pub const RESULT_HEADING: &str = "Extracted Text:";
pub const COPY_LABEL: &str = "Copy extracted text:";
pub const COPY_AREA_HEIGHT_PX: u32 = 300;

pub const ROUTE_INDEX: &str = "/";
pub const ROUTE_EXTRACT: &str = "/extract";
pub const ROUTE_HEALTH: &str = "/health";

pub const FIELD_FILE: &str = "file";
pub const FIELD_FORCE: &str = "force";

pub const KATEX_VERSION: &str = "0.16.11";
