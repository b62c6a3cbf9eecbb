use crate::matcher::*;
use crate::parser::arguments::Arguments;
use crate::parser::convert::{check_convert, convert};
use crate::parser::error::{ParseError, ParseFailure, Stage};
use crate::schema::Schema;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Parse pipeline configuration.
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{parse_with, Config, Schema, Stage};
///
/// let config = Config::default().strict_quotes(true);
/// let failure = parse_with(r#""unterminated"#, &Schema::empty(), &config).unwrap_err();
/// assert_eq!(failure.stage(), Stage::Lex);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    strict_quotes: bool,
}

impl Config {
    /// Whether an unterminated `"` is an error (`true`), or tolerated as a verbatim token (`false`, the default).
    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.strict_quotes = strict;
        self
    }

    pub(crate) fn is_strict_quotes(&self) -> bool {
        self.strict_quotes
    }
}

/// Parse the text against the schema, using the default [`Config`].
///
/// ### Example
/// ```
/// # use cmdbind_builder as cmdbind;
/// use cmdbind::{parse, ArgSpec, Schema, TypeTag, Value, Width};
///
/// let schema = Schema::new([
///     ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
///     ArgSpec::switch("c", TypeTag::Integer(Width::W32)),
/// ])
/// .unwrap();
///
/// let arguments = parse("2 -c 5", &schema).unwrap();
/// assert_eq!(arguments.get("a"), Some(&Value::Integer(2)));
/// assert_eq!(arguments.get("c"), Some(&Value::Integer(5)));
/// ```
pub fn parse(text: &str, schema: &Schema) -> Result<Arguments, ParseFailure> {
    parse_with(text, schema, &Config::default())
}

/// Parse the text against the schema.
///
/// The text passes through each stage in turn: lex, classify, assign, convert.
/// After each stage its errors are collected; if there are any, parsing halts with all of them and later stages never run.
pub fn parse_with(text: &str, schema: &Schema, config: &Config) -> Result<Arguments, ParseFailure> {
    // 1. Split the text into tokens.
    let tokens = lex(text);
    halt(Stage::Lex, check_lex(&tokens, config))?;

    // 2. Group the tokens into (name, value) pairs.
    let pairs = classify(&tokens, &schema.flag_names());
    halt(Stage::Classify, check_classify(&pairs))?;

    // 3. Name the unnamed pairs.
    let pairs = assign(pairs, schema);
    halt(Stage::Assign, check_assign(&pairs, schema))?;

    // 4. Convert the raw values.
    let values = convert(pairs, schema);
    halt(Stage::Convert, check_convert(&values, schema))?;

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Parsed {} arguments from '{text}'.", values.len());
    }

    Ok(Arguments::from_typed(values))
}

fn halt<E: Into<ParseError>>(stage: Stage, errors: Vec<E>) -> Result<(), ParseFailure> {
    if errors.is_empty() {
        return Ok(());
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Halting at the {stage} stage with {} errors.", errors.len());
    }

    Err(ParseFailure::new(
        stage,
        errors.into_iter().map(Into::into).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::AssignError;
    use crate::model::{TypeTag, Value, Width};
    use crate::parser::convert::ConvertError;
    use crate::schema::ArgSpec;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn two_ints() -> Schema {
        Schema::new([
            ArgSpec::positional("a", TypeTag::Integer(Width::W32)),
            ArgSpec::positional("b", TypeTag::Integer(Width::W32)),
        ])
        .unwrap()
    }

    #[test]
    fn parse_empty() {
        // Execute
        let arguments = parse("", &Schema::empty()).unwrap();

        // Verify
        assert!(arguments.is_empty());
    }

    #[test]
    fn parse_ints() {
        // Execute
        let arguments = parse("2 3", &two_ints()).unwrap();

        // Verify
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments.get("a"), Some(&Value::Integer(2)));
        assert_eq!(arguments.get("b"), Some(&Value::Integer(3)));
    }

    #[test]
    fn parse_missing_required() {
        // Execute
        let failure = parse("5", &two_ints()).unwrap_err();

        // Verify
        assert_eq!(failure.stage(), Stage::Assign);
        assert_matches!(
            failure.errors(),
            [ParseError::Assign(AssignError::MissingRequired { arg })] if arg.name() == "b"
        );
    }

    #[test]
    fn parse_missing_required_all_at_once() {
        // Execute
        let failure = parse("", &two_ints()).unwrap_err();

        // Verify
        let names: Vec<&str> = failure
            .errors()
            .iter()
            .filter_map(ParseError::raw_name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn parse_type_mismatch() {
        // Setup
        let schema = Schema::new([ArgSpec::positional("a", TypeTag::Integer(Width::W32))]).unwrap();

        // Execute
        let failure = parse("abc", &schema).unwrap_err();

        // Verify
        assert_eq!(failure.stage(), Stage::Convert);
        assert_matches!(
            failure.errors(),
            [ParseError::Convert(ConvertError::TypeMismatch { raw, offset: 0, .. })] if raw == "abc"
        );
        assert_eq!(failure.errors()[0].raw_value(), Some("abc"));
    }

    #[test]
    fn parse_assign_halts_before_convert() {
        // Execute
        // 'abc' would fail conversion, but the missing 'b' is reported first.
        let failure = parse("abc", &two_ints()).unwrap_err();

        // Verify
        assert_eq!(failure.stage(), Stage::Assign);
        assert_eq!(failure.errors().len(), 1);
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    fn parse_unterminated(#[case] strict: bool, #[case] expected_ok: bool) {
        // Setup
        let config = Config::default().strict_quotes(strict);

        // Execute
        let result = parse_with(r#"a "b"#, &Schema::empty(), &config);

        // Verify
        if expected_ok {
            let arguments = result.unwrap();
            assert_eq!(arguments.get("1"), Some(&Value::Text(r#""b"#.to_string())));
        } else {
            let failure = result.unwrap_err();
            assert_eq!(failure.stage(), Stage::Lex);
            assert_eq!(failure.offset(), Some(2));
        }
    }

    #[test]
    fn parse_schema_less() {
        // Execute
        let arguments = parse(r#"x "y z" --loud -n 3"#, &Schema::empty()).unwrap();

        // Verify
        assert_eq!(arguments.get("0"), Some(&Value::Text("x".to_string())));
        assert_eq!(arguments.get("1"), Some(&Value::Text("y z".to_string())));
        assert_eq!(arguments.get("loud"), Some(&Value::Bool(true)));
        assert_eq!(arguments.get("n"), Some(&Value::Text("3".to_string())));
    }

    #[test]
    fn positional_round_trip() {
        for _ in 0..100 {
            // Setup
            let count = thread_rng().gen_range(0..8);
            let words: Vec<String> = (0..count)
                .map(|_| {
                    let length = thread_rng().gen_range(1..10);
                    thread_rng()
                        .sample_iter(&Alphanumeric)
                        .take(length)
                        .map(char::from)
                        .collect()
                })
                .collect();
            let schema = Schema::new(
                (0..count).map(|i| ArgSpec::positional(format!("p{i}"), TypeTag::Text)),
            )
            .unwrap();
            let separator = " ".repeat(thread_rng().gen_range(1..4));
            let text = words.join(&separator);

            // Execute
            let tokens = lex(&text);
            let pairs = assign(classify(&tokens, &schema.flag_names()), &schema);

            // Verify
            let values: Vec<&str> = pairs
                .iter()
                .map(|pair| pair.value().map(Token::value).unwrap())
                .collect();
            assert_eq!(values, words);
            let names: Vec<String> = pairs.iter().map(|pair| pair.name().to_string()).collect();
            let expected: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
            assert_eq!(names, expected);
        }
    }
}
