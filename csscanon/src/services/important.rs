use crate::parser::{Declaration, RuleVisitor, Stylesheet};

/// All declarations marked `!important`, in document order.
pub fn extract_important_declarations(stylesheet: &Stylesheet) -> Vec<&Declaration> {
    let mut visitor = ImportantPropertyVisitor::default();
    stylesheet.accept(&mut visitor);
    return visitor.important;
}

#[derive(Default)]
struct ImportantPropertyVisitor<'a> {
    important: Vec<&'a Declaration>,
}

impl<'a> RuleVisitor<'a> for ImportantPropertyVisitor<'a> {
    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        if declaration.important {
            self.important.push(declaration);
        }
    }
}
