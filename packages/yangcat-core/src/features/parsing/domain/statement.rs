//! Keyword/argument statement node
//!
//! Every YANG construct is a statement: a keyword, an optional argument and an
//! ordered list of substatements. Extension statements keep their
//! `prefix:identifier` keyword verbatim.

/// One statement of a parsed schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub keyword: String,
    pub argument: Option<String>,
    /// 1-based source line of the keyword
    pub line: usize,
    pub children: Vec<Statement>,
}

impl Statement {
    pub fn new(keyword: impl Into<String>, line: usize) -> Self {
        Self {
            keyword: keyword.into(),
            argument: None,
            line,
            children: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Statement>) -> Self {
        self.children = children;
        self
    }

    /// Argument text, if any
    pub fn arg(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// First direct child with the given keyword
    pub fn find_child(&self, keyword: &str) -> Option<&Statement> {
        self.children.iter().find(|c| c.keyword == keyword)
    }

    /// All direct children with the given keyword, in document order
    pub fn find_children(&self, keyword: &str) -> Vec<&Statement> {
        self.children.iter().filter(|c| c.keyword == keyword).collect()
    }

    /// Argument of the first direct child with the given keyword
    pub fn child_arg(&self, keyword: &str) -> Option<&str> {
        self.find_child(keyword).and_then(Statement::arg)
    }

    /// Direct children whose keyword is `<prefix>:<identifier>` for any prefix
    pub fn find_extensions(&self, identifier: &str) -> Vec<&Statement> {
        self.children
            .iter()
            .filter(|c| {
                c.keyword
                    .split_once(':')
                    .map(|(_, ident)| ident == identifier)
                    .unwrap_or(false)
            })
            .collect()
    }
}
