/// Compact text form for custom pieces, e.g. `tee: 0,0 1,0 2,0 1,1`
///
/// Each cube is `x,z` or `x,z,h`; cubes are separated by whitespace or `;`.
/// The optional `name:` prefix defaults to `custom`.
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, i32 as integer, multispace0, space0},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::catalog::PieceDefinition;
use crate::coord::CubeCoord;
use crate::error::{Error, Result};

pub fn parse_piece(input: &str) -> Result<PieceDefinition> {
    match all_consuming(delimited(multispace0, piece, multispace0))(input) {
        Ok((_, piece)) => Ok(piece),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::Notation {
            fragment: e.input.chars().take(24).collect(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(Error::Notation {
            fragment: input.to_string(),
        }),
    }
}

fn piece(input: &str) -> IResult<&str, PieceDefinition> {
    let (input, name) = opt(terminated(name, pair(char(':'), multispace0)))(input)?;
    let (input, cubes) = separated_list1(separator, cube)(input)?;
    Ok((input, PieceDefinition::new(name.unwrap_or("custom"), cubes)))
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        map(delimited(space0, char(';'), multispace0), |_| ()),
        map(take_while1(|c: char| c.is_whitespace()), |_| ()),
    ))(input)
}

fn cube(input: &str) -> IResult<&str, CubeCoord> {
    let comma = || delimited(space0, char(','), space0);
    map(
        tuple((integer, preceded(comma(), integer), opt(preceded(comma(), integer)))),
        |(x, z, h)| CubeCoord::new(x, z, h.unwrap_or(0)),
    )(input)
}
