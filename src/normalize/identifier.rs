// Identifier extraction from CRM field names

/// Separator between segments of a CRM field name
pub const FIELD_SEPARATOR: char = '_';

/// Number of characters forming an outcome group code
pub const GROUP_CODE_LEN: usize = 3;

/// Derive the task identifier shared by a Youth field and its markers
///
/// Takes the third segment from the end, lower-cased. CRM custom fields end
/// in `__c`, so for `CAR_Youth_Resume__c` the segments are
/// `[CAR, Youth, Resume, "", c]` and the identifier is `resume`.
///
/// Returns `None` when the name has fewer than three segments.
pub fn task_identifier(field_name: &str) -> Option<String> {
    let segments: Vec<&str> = field_name.split(FIELD_SEPARATOR).collect();
    if segments.len() < 3 {
        return None;
    }
    Some(segments[segments.len() - 3].to_lowercase())
}

/// Outcome group code: the first three characters of the field name
pub fn group_code(field_name: &str) -> String {
    field_name.chars().take(GROUP_CODE_LEN).collect()
}
