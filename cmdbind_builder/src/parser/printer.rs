use crate::constant::{LONG_PREFIX, SHORT_PREFIX};
use crate::schema::{ArgKind, ArgSpec, Schema};

/// Renders the one line usage summary of a command.
pub(crate) struct Printer<'s> {
    schema: &'s Schema,
}

impl<'s> Printer<'s> {
    pub(crate) fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub(crate) fn usage(&self, command: &str) -> String {
        let mut summary = vec![format!("usage: {command}")];

        for spec in self.schema.specs() {
            let name_example = name_example(spec);
            let grammar = match spec.kind() {
                ArgKind::Positional => name_example,
                ArgKind::Flag => format!("[{}]", flag_form(spec)),
                ArgKind::Switch => format!("[{} {name_example}]", flag_form(spec)),
            };
            summary.push(grammar);
        }

        summary.join(" ")
    }
}

fn name_example(spec: &ArgSpec) -> String {
    spec.name().to_ascii_uppercase().replace('-', "_")
}

fn flag_form(spec: &ArgSpec) -> String {
    if spec.name().chars().count() == 1 {
        format!("{SHORT_PREFIX}{}", spec.name())
    } else {
        format!("{LONG_PREFIX}{}", spec.name())
    }
}

/// Shows where in the command text an error occurred.
///
/// Renders the text, and a caret under the offending byte offset on the line below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    text: String,
    offset: usize,
}

impl ErrorContext {
    /// Point at the byte `offset` of `text`.
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Past-the-end offsets point just beyond the last character.
        let offset = std::cmp::min(self.offset, self.text.len());
        let width = self
            .text
            .char_indices()
            .take_while(|(i, _)| *i < offset)
            .count();

        write!(f, "{}\n{:width$}^", self.text, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeTag, Width};
    use rstest::rstest;

    #[test]
    fn usage_empty() {
        // Setup
        let schema = Schema::empty();

        // Execute
        let usage = Printer::new(&schema).usage("quit");

        // Verify
        assert_eq!(usage, "usage: quit");
    }

    #[test]
    fn usage() {
        // Setup
        let schema = Schema::new([
            ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
            ArgSpec::positional("file-name", TypeTag::Text),
            ArgSpec::flag("invert"),
            ArgSpec::flag("v"),
            ArgSpec::switch("c", TypeTag::Integer(Width::W32)),
            ArgSpec::switch("mode", TypeTag::Text),
        ])
        .unwrap();

        // Execute
        let usage = Printer::new(&schema).usage("f");

        // Verify
        assert_eq!(
            usage,
            "usage: f A FILE_NAME [--invert] [-v] [-c C] [--mode MODE]"
        );
    }

    #[rstest]
    #[case("plus 2 x", 7, "plus 2 x\n       ^")]
    #[case("plus 2 x", 0, "plus 2 x\n^")]
    #[case("plus", 4, "plus\n    ^")]
    #[case("plus", 99, "plus\n    ^")]
    #[case("", 0, "\n^")]
    #[case("é x", 3, "é x\n  ^")]
    fn error_context(#[case] text: &str, #[case] offset: usize, #[case] expected: &str) {
        assert_eq!(ErrorContext::new(text, offset).to_string(), expected);
    }
}
