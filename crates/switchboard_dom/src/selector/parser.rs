//! nom grammar for the selector subset

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt, value},
    error::{context, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
    Finish, IResult,
};
use tracing::debug;

use super::{Combinator, ComplexSelector, CompoundSelector, SelectorPart};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parse a full selector list, rejecting trailing input
pub(super) fn parse_selector_list(input: &str) -> Result<Vec<ComplexSelector>, String> {
    let mut parser = all_consuming(delimited(
        multispace0,
        separated_list1(delimited(multispace0, char(','), multispace0), complex_selector),
        multispace0,
    ));
    parser(input).finish().map(|(_, list)| list).map_err(|err| {
        let message = format_verbose_error(&err);
        debug!(selector = input, %message, "selector parse error");
        message
    })
}

/// Format a VerboseError into a human-readable message
fn format_verbose_error(err: &VerboseError<&str>) -> String {
    let mut parts = Vec::new();

    for (input, kind) in &err.errors {
        let preview: String = input.chars().take(20).collect();
        match kind {
            VerboseErrorKind::Context(ctx) => parts.push(format!("in {ctx}")),
            VerboseErrorKind::Char(c) => {
                parts.push(format!("expected '{c}' near \"{preview}\""));
            }
            VerboseErrorKind::Nom(ErrorKind::Eof) => {
                parts.push(format!("unexpected trailing input \"{preview}\""));
            }
            VerboseErrorKind::Nom(ek) => parts.push(format!("{ek:?} near \"{preview}\"")),
        }
    }

    if parts.is_empty() {
        "unknown error".to_string()
    } else {
        parts.join(", ")
    }
}

/// Parse an identifier (alphanumeric, hyphen, underscore)
fn identifier(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn quoted(input: &str) -> ParseResult<&str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

/// `[name]` or `[name=value]` with optional quotes
fn attribute_selector(input: &str) -> ParseResult<SelectorPart> {
    context("attribute selector", |input| {
        let (input, _) = char('[')(input)?;
        let (input, _) = multispace0(input)?;
        let (input, name) = identifier(input)?;
        let (input, _) = multispace0(input)?;
        let (input, value) = opt(preceded(
            pair(char('='), multispace0),
            alt((quoted, identifier)),
        ))(input)?;
        let (input, _) = multispace0(input)?;
        let (input, _) = char(']')(input)?;
        Ok((
            input,
            SelectorPart::Attribute {
                name: name.to_string(),
                value: value.map(str::to_string),
            },
        ))
    })(input)
}

/// `#id`, `.class` or an attribute selector
fn subclass_selector(input: &str) -> ParseResult<SelectorPart> {
    alt((
        map(preceded(char('#'), identifier), |id: &str| {
            SelectorPart::Id(id.to_string())
        }),
        map(preceded(char('.'), identifier), |class: &str| {
            SelectorPart::Class(class.to_string())
        }),
        attribute_selector,
    ))(input)
}

/// `*` or a tag name
fn type_selector(input: &str) -> ParseResult<SelectorPart> {
    alt((
        value(SelectorPart::Universal, char('*')),
        map(identifier, |tag: &str| {
            SelectorPart::Tag(tag.to_ascii_lowercase())
        }),
    ))(input)
}

/// Parse a compound selector: an optional type selector followed by
/// any number of subclass selectors, e.g. `a.nav-link[data-toggle=tab]`
fn compound_selector(input: &str) -> ParseResult<CompoundSelector> {
    context("compound selector", |input| {
        let (input, head) = opt(type_selector)(input)?;
        let (input, rest) = many0(subclass_selector)(input)?;
        if head.is_none() && rest.is_empty() {
            return Err(nom::Err::Error(VerboseError::from_error_kind(
                input,
                ErrorKind::Many1,
            )));
        }
        let parts = head.into_iter().chain(rest).collect();
        Ok((input, CompoundSelector { parts }))
    })(input)
}

fn combinator(input: &str) -> ParseResult<Combinator> {
    alt((
        value(
            Combinator::Child,
            delimited(multispace0, char('>'), multispace0),
        ),
        value(Combinator::Descendant, multispace1),
    ))(input)
}

/// Parse a complex selector: compound selectors joined by combinators
///
/// Examples:
///   `#modal`
///   `.alert [data-dismiss="alert"]`
///   `.carousel-indicators > button`
fn complex_selector(input: &str) -> ParseResult<ComplexSelector> {
    let (input, first) = compound_selector(input)?;
    let (input, rest) = many0(pair(combinator, compound_selector))(input)?;

    let mut segments = vec![(first, None)];
    for (joint, compound) in rest {
        if let Some(last) = segments.last_mut() {
            last.1 = Some(joint);
        }
        segments.push((compound, None));
    }
    Ok((input, ComplexSelector { segments }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segments_carry_combinators() {
        let list = parse_selector_list(".alert > [data-dismiss='alert'] span").unwrap();
        assert_eq!(list.len(), 1);
        let segments = &list[0].segments;
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].1, Some(Combinator::Child));
        assert_eq!(segments[1].1, Some(Combinator::Descendant));
        assert_eq!(segments[2].1, None);
        assert_eq!(
            segments[1].0.parts,
            vec![SelectorPart::Attribute {
                name: "data-dismiss".to_string(),
                value: Some("alert".to_string()),
            }]
        );
    }

    #[test]
    fn test_tag_is_lowercased() {
        let list = parse_selector_list("BUTTON.Primary").unwrap();
        assert_eq!(
            list[0].segments[0].0.parts,
            vec![
                SelectorPart::Tag("button".to_string()),
                SelectorPart::Class("Primary".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_message_mentions_position() {
        let message = parse_selector_list("#ok }").unwrap_err();
        assert!(message.contains('}'), "unexpected message: {message}");
    }
}
