//! Declaration traversal: find every function definition in a parsed file.
//!
//! A function qualifies iff it has a body. Free functions, impl methods and
//! trait methods with default bodies all count, including inside inline
//! modules; closures and functions nested inside another body never do. The
//! traversal is read-only and reports records in document order.

use proc_macro2::LineColumn;
use syn::visit::Visit;

/// One qualifying function definition.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    /// Declared name
    pub name: String,
    /// 1-based source line of the declared name
    pub line: usize,
    /// Frontend position immediately past the body's opening `{`
    pub body_open: LineColumn,
}

/// Collect all function definitions in `file`, in source-appearance order.
pub fn functions(file: &syn::File) -> Vec<FunctionRecord> {
    let mut collector = Collector { records: Vec::new() };
    collector.visit_file(file);
    collector.records
}

struct Collector {
    records: Vec<FunctionRecord>,
}

impl Collector {
    fn push(&mut self, ident: &proc_macro2::Ident, block: &syn::Block) {
        self.records.push(FunctionRecord {
            name: ident.to_string(),
            line: ident.span().start().line,
            body_open: block.brace_token.span.open().end(),
        });
    }
}

impl<'ast> Visit<'ast> for Collector {
    // None of these recurse into the body, so nested fns and closures
    // stay out of the record stream.

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.push(&node.sig.ident, &node.block);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.push(&node.sig.ident, &node.block);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast syn::TraitItemFn) {
        // A trait method without a default body is a declaration, not a
        // definition.
        if let Some(block) = &node.default {
            self.push(&node.sig.ident, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(src: &str) -> Vec<FunctionRecord> {
        functions(&syn::parse_file(src).expect("test source must parse"))
    }

    fn names(records: &[FunctionRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_free_functions_in_document_order() {
        let src = "fn a() {}\n\nfn b() {}\nfn c() {}\n";
        let records = collect(src);
        assert_eq!(names(&records), ["a", "b", "c"]);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[2].line, 4);
    }

    #[test]
    fn test_impl_methods_qualify() {
        let src = "struct S;\nimpl S {\n    fn m(&self) {}\n}\n";
        let records = collect(src);
        assert_eq!(names(&records), ["m"]);
        assert_eq!(records[0].line, 3);
    }

    #[test]
    fn test_trait_default_body_qualifies_declaration_does_not() {
        let src = "trait T {\n    fn declared(&self);\n    fn defaulted(&self) {}\n}\n";
        let records = collect(src);
        assert_eq!(names(&records), ["defaulted"]);
    }

    #[test]
    fn test_trait_impl_methods_qualify() {
        let src = "trait T { fn m(&self); }\nstruct S;\nimpl T for S {\n    fn m(&self) {}\n}\n";
        assert_eq!(names(&collect(src)), ["m"]);
    }

    #[test]
    fn test_inline_module_functions_qualify() {
        let src = "mod inner {\n    pub fn deep() {}\n}\n";
        let records = collect(src);
        assert_eq!(names(&records), ["deep"]);
        assert_eq!(records[0].line, 2);
    }

    #[test]
    fn test_nested_functions_and_closures_excluded() {
        let src = "fn outer() {\n    fn inner() {}\n    let c = || inner();\n    c();\n}\n";
        assert_eq!(names(&collect(src)), ["outer"]);
    }

    #[test]
    fn test_body_open_points_past_opening_brace() {
        let src = "fn a() {}\n";
        let records = collect(src);
        // `{` is column 7 (0-based); the position past it is column 8.
        assert_eq!(records[0].body_open.line, 1);
        assert_eq!(records[0].body_open.column, 8);
    }

    #[test]
    fn test_empty_file_yields_no_records() {
        assert!(collect("// nothing here\n").is_empty());
    }
}
