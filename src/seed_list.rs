/// Bracketed list fields used by the candidate and score tables,
/// e.g. `[3, 17]` and `['ACGU', 'A-GU']`.
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult,
};

use crate::error::SeedError;

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn bracketed<'a, O, F>(item: F) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(
        ws(char('[')),
        separated_list0(ws(char(',')), item),
        ws(char(']')),
    )
}

fn position(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// Integer or integral float (`3` or `3.0`)
fn score(input: &str) -> IResult<&str, u32> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| -> Result<u32, String> {
            let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
            if value.fract() != 0.0 || value > u32::MAX as f64 {
                return Err(format!("non-integral score {s}"));
            }
            Ok(value as u32)
        },
    )(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), opt(is_not("'")), char('\'')),
            delimited(char('"'), opt(is_not("\"")), char('"')),
        )),
        |s: Option<&str>| s.unwrap_or_default().to_string(),
    )(input)
}

fn parse_list<'a, O, F>(field: &'static str, value: &'a str, item: F) -> Result<Vec<O>, SeedError>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    all_consuming(bracketed(item))(value)
        .map(|(_, items)| items)
        .map_err(|_| SeedError::MalformedList {
            field,
            value: value.to_string(),
        })
}

pub fn parse_positions(value: &str) -> Result<Vec<usize>, SeedError> {
    parse_list("seed position", value, position)
}

pub fn parse_seeds(value: &str) -> Result<Vec<String>, SeedError> {
    parse_list("seed", value, quoted)
}

pub fn parse_scores(value: &str) -> Result<Vec<u32>, SeedError> {
    parse_list("score", value, score)
}

pub fn format_numbers<T: std::fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn format_strings<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("'{}'", v.as_ref()))
        .collect();
    format!("[{}]", items.join(", "))
}
