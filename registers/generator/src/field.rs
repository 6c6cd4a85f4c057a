// Licensed under the Apache-2.0 license.

//! Parser for `Fields` cells such as `BUFFER_SIZE [15:0]`.

use crate::error::FieldParseError;
use crate::schema::FieldSpec;
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{delimited, opt, preceded, separated_pair};
use winnow::token::{one_of, take_while};
use winnow::Parser;

type PResult<T> = winnow::Result<T>;

// identifier ::= [A-Za-z_] [A-Za-z0-9_]*
fn identifier<'s>(i: &mut &'s str) -> PResult<&'s str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(i)
}

// bit_range ::= ws* '[' digits ':' digits ']'
fn bit_range<'s>(i: &mut &'s str) -> PResult<(&'s str, &'s str)> {
    preceded(
        multispace0,
        delimited('[', separated_pair(digit1, ':', digit1), ']'),
    )
    .parse_next(i)
}

fn bit_index(digits: &str) -> Result<u32, FieldParseError> {
    digits
        .parse()
        .map_err(|_| FieldParseError::IndexOverflow(digits.to_string()))
}

/// Parses a field descriptor.
///
/// Only a prefix has to match: anything after the identifier (or after the
/// bit range) is ignored, and a bracket that is not a well-formed
/// `[msb:lsb]` leaves a plain one-bit field at position 0.
pub fn parse_field(raw: &str) -> Result<FieldSpec, FieldParseError> {
    let mut input = raw.trim();
    let (name, range) = (identifier, opt(bit_range))
        .parse_next(&mut input)
        .map_err(|_| FieldParseError::NotAnIdentifier)?;
    let (msb, lsb) = match range {
        Some((msb, lsb)) => (bit_index(msb)?, bit_index(lsb)?),
        None => (0, 0),
    };
    let field = FieldSpec {
        name: name.to_string(),
        msb,
        lsb,
    };
    if field.width() == 0 {
        return Err(FieldParseError::ZeroWidth { msb, lsb });
    }
    Ok(field)
}
