//! Result assembly: orders accepted entities for the caller

use medscan_domain::Entity;

/// Order entities by start offset.
///
/// The sort is stable and nothing is filtered: the matcher already guarantees
/// non-overlap through its covered set.
pub fn assemble(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by_key(|e| e.start);
    debug_assert!(
        Entity::find_overlap(&entities).is_none(),
        "matcher produced overlapping entities"
    );
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(code: &str, start: usize, end: usize) -> Entity {
        Entity {
            term: "x".repeat(end - start),
            start,
            end,
            code: code.to_string(),
            description: String::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_sorts_by_start() {
        let out = assemble(vec![entity("B", 10, 14), entity("A", 0, 4), entity("C", 20, 22)]);
        let codes: Vec<_> = out.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty() {
        assert!(assemble(Vec::new()).is_empty());
    }

    #[test]
    fn test_nothing_filtered() {
        let input = vec![entity("A", 0, 4), entity("B", 5, 9)];
        assert_eq!(assemble(input.clone()), input);
    }
}
