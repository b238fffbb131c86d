//! Line-oriented signal file format
//!
//! ```text
//! 0            domain flag: 0 = time domain, 1 = amplitude/phase
//! 0            periodicity flag (kept, not interpreted)
//! 4            row count N
//! 0 1.5        N rows: "index value" or "amplitude phase"
//! ...
//! ```
//!
//! Frequency rows may also be `index amplitude phase`, and any numeric
//! token may end in a single unit letter (`2.5f`). Row consumption stops
//! quietly at the first row with an unexpected number of tokens; existing
//! fixture files rely on this.

use crate::error::{Result, SignalError};
use crate::signal::Signal;
use crate::spectrum::Spectrum;

const TIME_FLAG: &str = "0";
const FREQUENCY_FLAG: &str = "1";
const DEFAULT_PERIODICITY: &str = "0";

/// Which payload a file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Time,
    Frequency,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Time(Signal),
    Frequency(Spectrum),
}

/// Parsed signal file
#[derive(Debug, Clone, PartialEq)]
pub struct SignalFile {
    /// Periodicity header line as written
    pub periodicity: String,
    pub payload: Payload,
}

impl SignalFile {
    pub fn time(signal: Signal) -> Self {
        Self {
            periodicity: DEFAULT_PERIODICITY.to_string(),
            payload: Payload::Time(signal),
        }
    }

    pub fn frequency(spectrum: Spectrum) -> Self {
        Self {
            periodicity: DEFAULT_PERIODICITY.to_string(),
            payload: Payload::Frequency(spectrum),
        }
    }

    pub fn domain(&self) -> DomainKind {
        match self.payload {
            Payload::Time(_) => DomainKind::Time,
            Payload::Frequency(_) => DomainKind::Frequency,
        }
    }

    pub fn is_periodic(&self) -> bool {
        parse_flag(&self.periodicity) == Some(1)
    }
}

/// Parse a signal file
///
/// # Errors
/// `Format` when the header is shorter than three lines, the row count is
/// not a non-negative integer, or a well-shaped row holds a bad number.
pub fn parse(text: &str) -> Result<SignalFile> {
    let mut lines = text.lines();

    let mut header = [""; 3];
    for (slot, line_number) in header.iter_mut().zip(1..) {
        *slot = lines
            .next()
            .ok_or_else(|| SignalError::format(line_number, "", "missing header line"))?;
    }
    let [domain_line, periodicity_line, count_line] = header;

    // Anything other than an explicit 1 is read as time domain
    let domain = if parse_flag(domain_line) == Some(1) {
        DomainKind::Frequency
    } else {
        DomainKind::Time
    };

    let row_count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| SignalError::format(3, count_line, "row count is not an integer"))?;

    let rows = lines.take(row_count).zip(4..);
    let payload = match domain {
        DomainKind::Time => Payload::Time(parse_time_rows(rows, row_count)?),
        DomainKind::Frequency => Payload::Frequency(parse_frequency_rows(rows, row_count)?),
    };

    Ok(SignalFile {
        periodicity: periodicity_line.trim().to_string(),
        payload,
    })
}

/// Parse a file that must hold a time-domain signal
pub fn parse_signal(text: &str) -> Result<Signal> {
    match parse(text)?.payload {
        Payload::Time(signal) => Ok(signal),
        Payload::Frequency(_) => Err(SignalError::format(
            1,
            FREQUENCY_FLAG,
            "expected a time-domain signal",
        )),
    }
}

/// Parse a file that must hold an amplitude/phase spectrum
pub fn parse_spectrum(text: &str) -> Result<Spectrum> {
    match parse(text)?.payload {
        Payload::Frequency(spectrum) => Ok(spectrum),
        Payload::Time(_) => Err(SignalError::format(
            1,
            TIME_FLAG,
            "expected an amplitude/phase spectrum",
        )),
    }
}

fn parse_time_rows<'a>(
    rows: impl Iterator<Item = (&'a str, usize)>,
    declared: usize,
) -> Result<Signal> {
    // The declared count is untrusted; grow only with rows actually read
    let mut indices = Vec::new();
    let mut samples = Vec::new();

    for (line, line_number) in rows {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [index, value] = tokens[..] else {
            break;
        };

        indices.push(parse_index(index, line, line_number)?);
        samples.push(parse_number(value, line, line_number)?);
    }

    report_short_read(indices.len(), declared);
    Signal::new(indices, samples)
}

fn parse_frequency_rows<'a>(
    rows: impl Iterator<Item = (&'a str, usize)>,
    declared: usize,
) -> Result<Spectrum> {
    let mut amplitudes = Vec::new();
    let mut phases = Vec::new();

    for (line, line_number) in rows {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (amplitude, phase) = match tokens[..] {
            [amplitude, phase] | [_, amplitude, phase] => (amplitude, phase),
            _ => break,
        };

        amplitudes.push(parse_number(amplitude, line, line_number)?);
        phases.push(parse_number(phase, line, line_number)?);
    }

    report_short_read(amplitudes.len(), declared);
    Spectrum::from_polar(&amplitudes, &phases)
}

fn report_short_read(read: usize, declared: usize) {
    if read < declared {
        tracing::warn!(read, declared, "signal file ended before declared row count");
    } else {
        tracing::debug!(rows = read, "parsed signal file");
    }
}

/// Parse a float, dropping one trailing unit letter if needed
fn parse_number(token: &str, line: &str, line_number: usize) -> Result<f64> {
    token
        .parse()
        .or_else(|_| strip_unit_suffix(token).parse())
        .map_err(|_| SignalError::format(line_number, line, format!("invalid number {token:?}")))
}

/// Integer index; whole-valued floats such as `3.0` are accepted
fn parse_index(token: &str, line: &str, line_number: usize) -> Result<i64> {
    if let Ok(index) = token.parse::<i64>() {
        return Ok(index);
    }

    match parse_number(token, line, line_number)? {
        value if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(SignalError::format(
            line_number,
            line,
            format!("index {token:?} is not an integer"),
        )),
    }
}

fn parse_flag(line: &str) -> Option<i64> {
    let token = line.trim();
    token
        .parse::<i64>()
        .ok()
        .or_else(|| token.parse::<f64>().ok().map(|v| v.trunc() as i64))
}

fn strip_unit_suffix(token: &str) -> &str {
    match token.char_indices().last() {
        Some((pos, c)) if pos > 0 && c.is_ascii_alphabetic() => &token[..pos],
        _ => token,
    }
}

/// Serialize a parsed file, keeping its periodicity flag
pub fn serialize(file: &SignalFile) -> String {
    match &file.payload {
        Payload::Time(signal) => write_time(&file.periodicity, signal),
        Payload::Frequency(spectrum) => write_polar(
            &file.periodicity,
            &spectrum.amplitudes(),
            &spectrum.phases(),
        ),
    }
}

/// `index value` rows in stored order
pub fn serialize_signal(signal: &Signal) -> String {
    write_time(DEFAULT_PERIODICITY, signal)
}

/// `amplitude phase` rows with 14 decimals and an `f` suffix
pub fn serialize_spectrum(spectrum: &Spectrum) -> String {
    write_polar(DEFAULT_PERIODICITY, &spectrum.amplitudes(), &spectrum.phases())
}

/// Same format as [`serialize_spectrum`] from explicit arrays
///
/// Rows beyond the shorter of the two arrays are dropped.
pub fn serialize_polar(amplitudes: &[f64], phases: &[f64]) -> String {
    write_polar(DEFAULT_PERIODICITY, amplitudes, phases)
}

fn write_time(periodicity: &str, signal: &Signal) -> String {
    let mut out = header(TIME_FLAG, periodicity, signal.len());
    for (index, sample) in signal.iter() {
        out.push_str(&format!("{index} {sample}\n"));
    }
    out
}

fn write_polar(periodicity: &str, amplitudes: &[f64], phases: &[f64]) -> String {
    let rows = amplitudes.len().min(phases.len());
    let mut out = header(FREQUENCY_FLAG, periodicity, rows);
    for (amplitude, phase) in amplitudes.iter().zip(phases) {
        out.push_str(&format!("{amplitude:.14}f {phase:.14}f\n"));
    }
    out
}

fn header(domain: &str, periodicity: &str, rows: usize) -> String {
    format!("{domain}\n{periodicity}\n{rows}\n")
}
