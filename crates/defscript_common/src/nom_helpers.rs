//! nom helpers

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1};
use nom::combinator::recognize;
use nom::error::ParseError;
use nom::multi::many0_count;
use nom::sequence::pair;
use nom::IResult;

/// Recognizes an ECMAScript-style identifier: a letter, `_` or `$`, followed by
/// any number of letters, digits, `_` or `$`.
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        alt((alpha1, tag("_"), tag("$"))),
        many0_count(alt((alphanumeric1, tag("_"), tag("$")))),
    ))(input)
}

#[cfg(test)]
mod tests {
    use crate::nom_helpers::recognize_identifier;
    use nom::Finish;

    #[test]
    fn test_one_letter_variable() {
        let id = "i ";
        let (rest, parsed) = recognize_identifier::<nom::error::Error<_>>(id)
            .finish()
            .unwrap();
        assert_eq!(parsed, "i");
        assert_eq!(rest, " ");
    }

    #[test]
    fn test_minted_name() {
        let (_, parsed) = recognize_identifier::<nom::error::Error<_>>("_temp$12 < c")
            .finish()
            .unwrap();
        assert_eq!(parsed, "_temp$12");
    }

    #[test]
    fn test_no_leading_digit() {
        assert!(recognize_identifier::<nom::error::Error<_>>("1abc").is_err());
    }
}
