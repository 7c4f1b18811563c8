pub mod todo_parser;
pub mod todo_serializer;

pub use todo_parser::parse_todos;
pub use todo_serializer::serialize_todos;

/// Separates records in the store file
pub const RECORD_SEPARATOR: &str = "|||";
/// Separates fields within a record
pub const FIELD_SEPARATOR: &str = "::";
/// Separates notification times within the time field
pub const TIME_SEPARATOR: &str = ",";

/// True if `text` can be stored as a title or description without breaking
/// the record format. A leading or trailing `:` would merge with the
/// neighbouring field separator.
pub fn is_storable_text(text: &str) -> bool {
    !text.contains(RECORD_SEPARATOR)
        && !text.contains(FIELD_SEPARATOR)
        && !text.contains('\n')
        && !text.starts_with(':')
        && !text.ends_with(':')
}
