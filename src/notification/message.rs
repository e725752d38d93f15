use crate::models::notification::EntityOperation;

/// Render the human-readable text for an entity-change event.
///
/// A present, non-blank `display_name` is quoted after the entity type;
/// otherwise the record is referred to by id.
pub fn format_message(
    entity_type: &str,
    entity_id: &str,
    display_name: Option<&str>,
    operation: EntityOperation,
) -> String {
    let subject = match display_name.filter(|name| !name.trim().is_empty()) {
        Some(name) => format!("{} '{}'", entity_type, name),
        None => format!("{} (ID: {})", entity_type, entity_id),
    };

    match operation {
        EntityOperation::Create => format!("New {} has been created", subject),
        EntityOperation::Update => format!("{} has been updated", subject),
        EntityOperation::Delete => format!("{} has been deleted", subject),
    }
}
