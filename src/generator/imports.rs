use std::collections::BTreeSet;

/// Fully qualified type names a generated file refers to.
///
/// One registry is created per artifact and passed by `&mut` through the
/// fragment builders. Entries are unique and always rendered in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    imports: BTreeSet<String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type; adding it again is a no-op.
    pub fn add(&mut self, fqcn: impl Into<String>) {
        self.imports.insert(fqcn.into());
    }

    /// Remove a type. Absent types are ignored; other entries are untouched.
    pub fn remove(&mut self, fqcn: &str) {
        self.imports.remove(fqcn);
    }

    pub fn contains(&self, fqcn: &str) -> bool {
        self.imports.contains(fqcn)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// One `use X;` line per type, sorted. Empty registry renders as "".
    pub fn render(&self) -> String {
        self.imports
            .iter()
            .map(|fqcn| format!("use {fqcn};"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_empty() {
        assert_eq!(ImportRegistry::new().render(), "");
    }

    #[test]
    fn test_add_is_idempotent_and_sorted() {
        let mut reg = ImportRegistry::new();
        reg.add("Spatie\\QueryBuilder\\AllowedFilter");
        reg.add("App\\Models\\Post");
        reg.add("Illuminate\\Http\\JsonResponse");
        reg.add("App\\Models\\Post");
        assert_eq!(reg.len(), 3);
        assert_eq!(
            reg.render(),
            "use App\\Models\\Post;\nuse Illuminate\\Http\\JsonResponse;\nuse Spatie\\QueryBuilder\\AllowedFilter;"
        );
    }

    #[test]
    fn test_remove_leaves_others() {
        let mut reg = ImportRegistry::new();
        reg.add("A\\One");
        reg.add("A\\Two");
        reg.remove("A\\One");
        reg.remove("A\\Missing");
        assert!(!reg.contains("A\\One"));
        assert!(reg.contains("A\\Two"));
        assert_eq!(reg.render(), "use A\\Two;");
    }

    #[test]
    fn test_render_has_no_duplicates_after_mixed_ops() {
        let mut reg = ImportRegistry::new();
        let ops = ["C", "A", "B", "A", "-B", "B", "C", "-Z", "D", "-A"];
        for op in ops {
            match op.strip_prefix('-') {
                Some(name) => reg.remove(name),
                None => reg.add(op),
            }
        }
        let rendered = reg.render();
        let lines: Vec<&str> = rendered.lines().collect();
        let mut sorted = lines.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(lines, sorted);
        assert_eq!(lines, vec!["use B;", "use C;", "use D;"]);
    }
}
