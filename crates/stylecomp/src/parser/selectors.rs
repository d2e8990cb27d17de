use crate::parser::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorPart, values::parse_ident,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded},
};

/// Parses a simple selector: Type, .Class, #ID, pseudo-classes,
/// pseudo-elements, `:host(...)`, `&`, `*` or an attribute selector.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(preceded(tag("::"), parse_ident), |s| {
            Selector::PseudoElement(s.to_string())
        }),
        parse_host_selector,
        map(preceded(char(':'), parse_ident), |s| {
            Selector::PseudoClass(s.to_string())
        }),
        map(char('&'), |_| Selector::Parent),
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., ".post.card.unread").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between simple selectors: `.post:hover` is one compound
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a complex selector with combinators (e.g., ":host([noborders]) .post > .thumb").
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current_compound) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        let combinator_match: IResult<&str, Combinator> = alt((
            map(char('>'), |_| Combinator::Child),
            map(char('+'), |_| Combinator::AdjacentSibling),
            map(char('~'), |_| Combinator::GeneralSibling),
        ))(rem);

        if let Ok((after_op, found_combinator)) = combinator_match {
            let (after_ws, _) = multispace0(after_op)?;
            match parse_compound_selector(after_ws) {
                Ok((next_input, next_compound)) => {
                    parts.push(SelectorPart::new(current_compound, found_combinator));
                    current_compound = next_compound;
                    input = next_input;
                    continue;
                }
                Err(_) => break,
            }
        }

        // Whitespace alone is the descendant combinator
        if !ws.is_empty() {
            match parse_compound_selector(rem) {
                Ok((next_input, next_compound)) => {
                    parts.push(SelectorPart::new(current_compound, Combinator::Descendant));
                    current_compound = next_compound;
                    input = next_input;
                    continue;
                }
                Err(_) => break,
            }
        }

        break;
    }

    // The last part always has Combinator::None
    parts.push(SelectorPart::new(current_compound, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

fn parse_host_selector(input: &str) -> IResult<&str, Selector> {
    let (input, _) = tag(":host")(input)?;
    let (input, arg) = opt(delimited(
        char('('),
        delimited(multispace0, parse_compound_selector, multispace0),
        char(')'),
    ))(input)?;
    Ok((input, Selector::Host(arg)))
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, content) = delimited(char('['), take_until("]"), char(']'))(input)?;

    if let Some(idx) = content.find('=') {
        let name = content[..idx].trim();
        let value = content[idx + 1..]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'');
        Ok((
            input,
            Selector::Attribute(name.to_string(), Some(value.to_string())),
        ))
    } else {
        // [attr] existence selector
        Ok((input, Selector::Attribute(content.trim().to_string(), None)))
    }
}
