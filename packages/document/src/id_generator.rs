use crate::document::Document;
use crate::kind::SectionKind;
use uuid::Uuid;

/// Fresh document id
pub fn document_id() -> String {
    format!("page-{}", Uuid::new_v4().simple())
}

/// Fresh section id, prefixed with the kind's slug (`hero-3f9c2a17b0d4`)
pub fn section_id(kind: &SectionKind) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", kind.slug(), &suffix[..12])
}

/// Section id guaranteed not to collide with any section already in `doc`
pub fn unique_section_id(kind: &SectionKind, doc: &Document) -> String {
    loop {
        let id = section_id(kind);
        if !doc.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_section_ids_are_prefixed_by_kind() {
        let id = section_id(&SectionKind::Pricing);
        assert!(id.starts_with("pricing-"));
        assert_eq!(id.len(), "pricing-".len() + 12);
    }

    #[test]
    fn test_rapid_successive_ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| section_id(&SectionKind::Hero)).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_document_ids_are_distinct() {
        assert_ne!(document_id(), document_id());
    }
}
