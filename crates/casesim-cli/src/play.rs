//! Interactive walkthrough of one case over a line-based terminal.

use std::io::{BufRead, Write};

use casesim_engine::{AttemptSummary, CaseSession, EngineError, Stage};

use crate::render::{DifferentialDisplay, FinalDisplay, OutcomeDisplay, RenderOptions, ViewDisplay};

/// Drive `session` to completion reading answers from `input`.
///
/// Returns the attempt summary, or `None` if input ran out first.
pub fn play<R: BufRead, W: Write>(
    session: &mut CaseSession,
    mut input: R,
    mut output: W,
    options: RenderOptions,
) -> eyre::Result<Option<AttemptSummary>> {
    for warning in session.warnings() {
        tracing::debug!(study = %warning.study, "{warning}");
    }

    loop {
        let Some(stage) = session.stage() else {
            return Err(EngineError::NoActiveCase.into());
        };
        let view = session.view()?;
        writeln!(output, "\n{}", ViewDisplay { view: &view, options })?;

        match stage {
            Stage::Presentation | Stage::PhysicalExam | Stage::StudyResults => {
                write!(output, "[enter to continue] ")?;
                output.flush()?;
                if read_line(&mut input)?.is_none() {
                    return Ok(None);
                }
            }
            Stage::DifferentialBuilder => {
                write!(output, "> ")?;
                output.flush()?;
                let Some(text) = read_line(&mut input)? else {
                    return Ok(None);
                };
                let result = session.submit_differential(&text)?;
                writeln!(output, "{}", DifferentialDisplay(&result))?;
            }
            Stage::EmgDecision => {
                let Some(indicated) = read_decision(&mut input, &mut output)? else {
                    return Ok(None);
                };
                let outcome = session.submit_emg_decision(indicated)?;
                writeln!(output, "{}", OutcomeDisplay(&outcome))?;
            }
            Stage::FinalDiagnosis => {
                write!(output, "> ")?;
                output.flush()?;
                let Some(text) = read_line(&mut input)? else {
                    return Ok(None);
                };
                match session.submit_final_diagnosis(&text) {
                    Ok(result) => {
                        writeln!(output, "\n{}", FinalDisplay(&result))?;
                        return Ok(session.summary());
                    }
                    Err(EngineError::EmptySubmission) => {
                        writeln!(output, "Enter a diagnosis to finish the case.")?;
                    }
                    Err(e) => return Err(e.into()),
                }
                continue;
            }
        }

        session.advance()?;
    }
}

/// Ask until the learner answers yes or no.
fn read_decision<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> eyre::Result<Option<bool>> {
    loop {
        write!(output, "[y/n] ")?;
        output.flush()?;
        let Some(answer) = read_line(input)? else {
            return Ok(None);
        };
        match parse_yes_no(&answer) {
            Some(indicated) => return Ok(Some(indicated)),
            None => writeln!(output, "Please answer y or n.")?,
        }
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// One line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> eyre::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
