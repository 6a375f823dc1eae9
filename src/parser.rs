//! Schema definition language parser.
//!
//! Handles `schema`, `type`, `extend type`, `input`, `enum` and `scalar`
//! definitions. Descriptions are accepted and dropped. Directive arguments
//! and default values become `serde_json::Value`: enum literals turn into
//! strings.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_until, take_while, take_while_m_n},
    character::complete::{char, digit1, multispace1, not_line_ending, one_of, satisfy},
    combinator::{all_consuming, cut, map, map_opt, opt, recognize, value, verify},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use serde_json::{Map, Value};

use crate::ast::{
    is_name_continue, is_name_start, Definition, Directive, Document, EnumType, FieldDefinition,
    InputObjectType, InputValue, ObjectExtension, ObjectType, OperationTypeDefinition, ScalarType,
    SchemaDefinition, TypeRef,
};
use crate::error::TransformError;
use crate::types::RootOperation;

type PResult<'a, T> = IResult<&'a str, T>;

/// Parse a schema document.
///
/// # Errors
///
/// Returns `TransformError::Parse` with the 1-based position of the first
/// definition or field that could not be parsed.
pub fn parse_document(source: &str) -> Result<Document, TransformError> {
    match document(source) {
        Ok((_, definitions)) => Ok(Document { definitions }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(source, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(source, "")),
    }
}

fn syntax_error(source: &str, rest: &str) -> TransformError {
    let rest = ignored(rest).map_or(rest, |(r, _)| r);
    let offset = source.len().saturating_sub(rest.len());
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rsplit('\n')
        .next()
        .map_or(0, |l| l.chars().count())
        + 1;

    let message = match rest.lines().next() {
        Some(l) if !l.trim().is_empty() => {
            let snippet: String = l.trim().chars().take(32).collect();
            format!("unexpected `{}`", snippet)
        }
        _ => "unexpected end of input".to_string(),
    };

    TransformError::Parse {
        line,
        column,
        message,
    }
}

// --- Lexical ---

/// Whitespace, commas and `#` comments.
fn ignored(input: &str) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), char(',')),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn token<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    preceded(ignored, inner)
}

fn punct<'a>(c: char) -> impl FnMut(&'a str) -> PResult<'a, char> {
    token(char(c))
}

/// `open inner close`; once `open` matches, a failure inside is not backtracked.
fn enclosed<'a, O, F>(open: char, inner: F, close: char) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    preceded(punct(open), cut(terminated(inner, punct(close))))
}

fn raw_name(input: &str) -> PResult<'_, &str> {
    recognize(pair(satisfy(is_name_start), take_while(is_name_continue)))(input)
}

fn name(input: &str) -> PResult<'_, String> {
    map(token(raw_name), String::from)(input)
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    token(verify(raw_name, move |n: &str| n == kw))
}

fn block_string(input: &str) -> PResult<'_, String> {
    map(
        delimited(tag("\"\"\""), take_until("\"\"\""), tag("\"\"\"")),
        |s: &str| s.trim().to_string(),
    )(input)
}

fn quoted_string(input: &str) -> PResult<'_, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\"\n"),
                '\\',
                alt((
                    value('\\', char('\\')),
                    value('"', char('"')),
                    value('/', char('/')),
                    value('\u{8}', char('b')),
                    value('\u{c}', char('f')),
                    value('\n', char('n')),
                    value('\r', char('r')),
                    value('\t', char('t')),
                    preceded(char('u'), unicode_escape),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

/// Four hex digits after `\u`.
fn unicode_escape(input: &str) -> PResult<'_, char> {
    map_opt(
        take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
    )(input)
}

fn string_value(input: &str) -> PResult<'_, String> {
    alt((block_string, quoted_string))(input)
}

fn description(input: &str) -> PResult<'_, ()> {
    value((), token(string_value))(input)
}

fn number_value(input: &str) -> PResult<'_, Value> {
    map_opt(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |text: &str| {
            if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
                text.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
            } else {
                text.parse::<i64>().ok().map(Value::from)
            }
        },
    )(input)
}

// --- Values and directives ---

fn const_value(input: &str) -> PResult<'_, Value> {
    preceded(
        ignored,
        alt((
            map(string_value, Value::String),
            number_value,
            map(
                delimited(char('['), many0(const_value), punct(']')),
                Value::Array,
            ),
            map(
                delimited(char('{'), many0(object_field), punct('}')),
                |fields: Vec<(String, Value)>| Value::Object(fields.into_iter().collect()),
            ),
            map(raw_name, |word: &str| match word {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                "null" => Value::Null,
                other => Value::String(other.to_string()),
            }),
        )),
    )(input)
}

fn object_field(input: &str) -> PResult<'_, (String, Value)> {
    pair(name, preceded(punct(':'), const_value))(input)
}

fn arguments(input: &str) -> PResult<'_, Map<String, Value>> {
    map(
        enclosed('(', many0(object_field), ')'),
        |args: Vec<(String, Value)>| args.into_iter().collect(),
    )(input)
}

fn directive(input: &str) -> PResult<'_, Directive> {
    map(
        pair(
            preceded(punct('@'), map(raw_name, String::from)),
            opt(arguments),
        ),
        |(name, arguments)| Directive {
            name,
            arguments: arguments.unwrap_or_default(),
        },
    )(input)
}

fn directives(input: &str) -> PResult<'_, Vec<Directive>> {
    many0(directive)(input)
}

// --- Types and fields ---

fn type_ref(input: &str) -> PResult<'_, TypeRef> {
    let (input, base) = alt((
        map(delimited(punct('['), type_ref, punct(']')), |inner| {
            TypeRef::List(Box::new(inner))
        }),
        map(name, TypeRef::Named),
    ))(input)?;
    let (input, bang) = opt(punct('!'))(input)?;

    let ty = if bang.is_some() {
        TypeRef::NonNull(Box::new(base))
    } else {
        base
    };
    Ok((input, ty))
}

fn input_value_def(input: &str) -> PResult<'_, InputValue> {
    map(
        tuple((
            opt(description),
            name,
            preceded(punct(':'), type_ref),
            opt(preceded(punct('='), const_value)),
            directives,
        )),
        |(_, name, ty, default_value, _)| InputValue {
            name,
            ty,
            default_value,
        },
    )(input)
}

fn field_def(input: &str) -> PResult<'_, FieldDefinition> {
    map(
        tuple((
            opt(description),
            name,
            opt(enclosed('(', many0(input_value_def), ')')),
            preceded(punct(':'), type_ref),
            directives,
        )),
        |(_, name, arguments, ty, directives)| FieldDefinition {
            name,
            arguments: arguments.unwrap_or_default(),
            ty,
            directives,
        },
    )(input)
}

fn fields_body(input: &str) -> PResult<'_, Vec<FieldDefinition>> {
    enclosed('{', many0(field_def), '}')(input)
}

// --- Definitions ---

fn object_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(opt(description), keyword("type")),
            cut(tuple((name, directives, opt(fields_body)))),
        ),
        |(name, directives, fields)| {
            Definition::Object(ObjectType {
                name,
                fields: fields.unwrap_or_default(),
                directives,
            })
        },
    )(input)
}

fn extension_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(keyword("extend"), cut(keyword("type"))),
            cut(tuple((name, directives, opt(fields_body)))),
        ),
        |(name, _, fields)| {
            Definition::Extension(ObjectExtension {
                name,
                fields: fields.unwrap_or_default(),
            })
        },
    )(input)
}

fn input_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(opt(description), keyword("input")),
            cut(tuple((
                name,
                directives,
                opt(enclosed('{', many0(input_value_def), '}')),
            ))),
        ),
        |(name, _, fields)| {
            Definition::Input(InputObjectType {
                name,
                fields: fields.unwrap_or_default(),
            })
        },
    )(input)
}

fn enum_value(input: &str) -> PResult<'_, String> {
    map(tuple((opt(description), name, directives)), |(_, n, _)| n)(input)
}

fn enum_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(opt(description), keyword("enum")),
            cut(tuple((
                name,
                directives,
                opt(enclosed('{', many0(enum_value), '}')),
            ))),
        ),
        |(name, _, values)| {
            Definition::Enum(EnumType {
                name,
                values: values.unwrap_or_default(),
            })
        },
    )(input)
}

fn scalar_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(opt(description), keyword("scalar")),
            cut(terminated(name, directives)),
        ),
        |name| Definition::Scalar(ScalarType { name }),
    )(input)
}

fn operation_type_def(input: &str) -> PResult<'_, OperationTypeDefinition> {
    map(
        pair(
            alt((
                value(RootOperation::Query, keyword("query")),
                value(RootOperation::Mutation, keyword("mutation")),
            )),
            preceded(punct(':'), name),
        ),
        |(operation, type_name)| OperationTypeDefinition {
            operation,
            type_name,
        },
    )(input)
}

fn schema_def(input: &str) -> PResult<'_, Definition> {
    map(
        preceded(
            pair(opt(description), keyword("schema")),
            cut(preceded(
                directives,
                enclosed('{', many0(operation_type_def), '}'),
            )),
        ),
        |operations| Definition::Schema(SchemaDefinition { operations }),
    )(input)
}

fn definition(input: &str) -> PResult<'_, Definition> {
    alt((
        schema_def,
        object_def,
        extension_def,
        input_def,
        enum_def,
        scalar_def,
    ))(input)
}

fn document(input: &str) -> PResult<'_, Vec<Definition>> {
    all_consuming(terminated(many0(definition), ignored))(input)
}
