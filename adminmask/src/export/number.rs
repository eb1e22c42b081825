//! Float text in the dashboard's form.
//!
//! Digits are the shortest round-trip representation. Placement follows
//! `Number#toString`: plain decimal for `1e-7 <= |x| < 1e21`, exponent form
//! (`1e+21`, `1.5e-7`) outside that range, no trailing `.0`.

use std::io;

use serde_json::ser::{Formatter, PrettyFormatter};

/// Largest decimal exponent still written out in full.
const MAX_PLAIN_EXPONENT: i32 = 21;
/// Smallest decimal exponent still written as `0.000…`.
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Formats a finite `f64` the way the dashboard displayed it.
pub(crate) fn float_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let shortest = buffer.format_finite(value.abs());
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (shortest, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = format!("{whole}{fraction}");
    let significant = all_digits.trim_start_matches('0');
    let leading_zeros = all_digits.len() - significant.len();
    let digits = significant.trim_end_matches('0');

    // value = 0.<digits> * 10^point
    let point = to_i32(whole.len()) + exponent - to_i32(leading_zeros);
    let count = to_i32(digits.len());

    let sign = if value < 0.0 { "-" } else { "" };
    let body = if count <= point && point <= MAX_PLAIN_EXPONENT {
        format!("{digits}{}", "0".repeat(to_usize(point - count)))
    } else if 0 < point && point <= MAX_PLAIN_EXPONENT {
        let (head, tail) = digits.split_at(to_usize(point));
        format!("{head}.{tail}")
    } else if MIN_PLAIN_EXPONENT < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(to_usize(-point)))
    } else {
        let shown = point - 1;
        let exponent_sign = if shown < 0 { '-' } else { '+' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}e{exponent_sign}{}", shown.abs())
        } else {
            format!("{head}.{tail}e{exponent_sign}{}", shown.abs())
        }
    };
    format!("{sign}{body}")
}

fn to_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn to_usize(n: i32) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Two-space pretty printing with dashboard float text.
pub(crate) struct DashboardFormatter {
    pretty: PrettyFormatter<'static>,
}

impl DashboardFormatter {
    pub(crate) fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for DashboardFormatter {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_text(value).as_bytes())
    }

    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        self.write_f64(writer, f64::from(value))
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}
