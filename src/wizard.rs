//! Landing, form, loading and results pages as an explicit state machine.
//!
//! [`transition`] is the whole page table; [`Session`] layers the data each
//! page owns on top of it, and [`run_interactive`] drives a session over a
//! line-oriented terminal.

use crate::error::{AppError, Result};
use crate::llm::ReasoningService;
use crate::pipeline::{self, AnalysisPhase};
use crate::report;
use crate::types::config::BlendWeights;
use crate::types::input::{Field, FounderInput};
use crate::types::report::BlendedResult;
use std::io::{BufRead, Write};
use tracing::{error, warn};

pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";
const BACK_COMMAND: &str = ":back";

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FormStep {
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const STEPS: [FormStep; 5] = [
    FormStep {
        label: "The Idea",
        fields: &[
            FieldSpec {
                field: Field::IdeaName,
                label: "Startup Name",
                placeholder: "e.g. NeuralMatch",
            },
            FieldSpec {
                field: Field::IdeaDescription,
                label: "Describe Your Idea",
                placeholder: "What does your product/service do? Be specific...",
            },
            FieldSpec {
                field: Field::ProblemSolving,
                label: "What Problem Does It Solve?",
                placeholder: "What pain point are you addressing?",
            },
            FieldSpec {
                field: Field::TargetAudience,
                label: "Target Audience",
                placeholder: "Who are your ideal customers?",
            },
            FieldSpec {
                field: Field::UniqueValue,
                label: "Unique Value Proposition",
                placeholder: "Why would someone choose you over alternatives?",
            },
        ],
    },
    FormStep {
        label: "Competition",
        fields: &[
            FieldSpec {
                field: Field::Competitors,
                label: "Known Competitors",
                placeholder: "List your main competitors and what they do...",
            },
            FieldSpec {
                field: Field::CompetitorWeakness,
                label: "Their Weaknesses",
                placeholder: "Where do existing solutions fall short?",
            },
            FieldSpec {
                field: Field::MarketSize,
                label: "Estimated Market Size",
                placeholder: "e.g. $2B TAM, growing 15% YoY",
            },
        ],
    },
    FormStep {
        label: "Revenue Model",
        fields: &[
            FieldSpec {
                field: Field::RevenueModel,
                label: "Revenue Model",
                placeholder: "How will you make money? (SaaS, marketplace, ads, etc.)",
            },
            FieldSpec {
                field: Field::Pricing,
                label: "Pricing Strategy",
                placeholder: "e.g. $29/mo starter, $99/mo pro, enterprise custom",
            },
            FieldSpec {
                field: Field::CustomerAcquisition,
                label: "Customer Acquisition Strategy",
                placeholder: "How will you get your first 100 customers?",
            },
        ],
    },
    FormStep {
        label: "Your Team",
        fields: &[
            FieldSpec {
                field: Field::TeamSize,
                label: "Team Size",
                placeholder: "e.g. 2 co-founders + 1 engineer",
            },
            FieldSpec {
                field: Field::TeamSkills,
                label: "Team Skills & Background",
                placeholder: "What relevant skills does your team bring?",
            },
            FieldSpec {
                field: Field::FounderExperience,
                label: "Founder Experience",
                placeholder: "Previous startups, industry experience, domain expertise...",
            },
        ],
    },
    FormStep {
        label: "Roadmap",
        fields: &[
            FieldSpec {
                field: Field::MvpTimeline,
                label: "MVP Timeline",
                placeholder: "e.g. 3 months to launch beta",
            },
            FieldSpec {
                field: Field::Milestones,
                label: "Key Milestones (Next 12 Months)",
                placeholder: "What are your major goals and deadlines?",
            },
            FieldSpec {
                field: Field::FundingNeeded,
                label: "Funding Needed",
                placeholder: "e.g. $500K seed round, bootstrapped, etc.",
            },
        ],
    },
];

const LAST_STEP: usize = STEPS.len() - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Form { step: usize },
    Loading { phase: AnalysisPhase },
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SignedIn { name: String },
    SignedOut,
    Next,
    Back,
    Submit,
    Phase(AnalysisPhase),
    Completed(Box<BlendedResult>),
    Failed(String),
    StartOver,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::SignedIn { .. } => "SignedIn",
            Event::SignedOut => "SignedOut",
            Event::Next => "Next",
            Event::Back => "Back",
            Event::Submit => "Submit",
            Event::Phase(_) => "Phase",
            Event::Completed(_) => "Completed",
            Event::Failed(_) => "Failed",
            Event::StartOver => "StartOver",
        }
    }
}

/// The page table. `None` means the event is not accepted on `page`.
pub fn transition(page: Page, event: &Event) -> Option<Page> {
    match (page, event) {
        (_, Event::SignedOut) => Some(Page::Landing),
        (Page::Landing, Event::SignedIn { .. }) => Some(Page::Form { step: 0 }),
        (Page::Form { step }, Event::Next) if step < LAST_STEP => {
            Some(Page::Form { step: step + 1 })
        }
        (Page::Form { step }, Event::Back) if step > 0 => Some(Page::Form { step: step - 1 }),
        (Page::Form { step: LAST_STEP }, Event::Submit) => Some(Page::Loading {
            phase: AnalysisPhase::Research,
        }),
        (Page::Loading { .. }, Event::Phase(phase)) => Some(Page::Loading { phase: *phase }),
        (Page::Loading { .. }, Event::Completed(_)) => Some(Page::Results),
        (Page::Loading { .. }, Event::Failed(_)) => Some(Page::Form { step: LAST_STEP }),
        (Page::Results, Event::StartOver) => Some(Page::Form { step: 0 }),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub page: Page,
    pub user_name: String,
    pub input: FounderInput,
    pub result: Option<BlendedResult>,
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            page: Page::Landing,
            user_name: String::new(),
            input: FounderInput::default(),
            result: None,
            error: None,
        }
    }
}

impl Session {
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let next = transition(self.page, &event).ok_or_else(|| {
            AppError::InvalidTransition(format!("{} not accepted on {:?}", event.name(), self.page))
        })?;

        match event {
            Event::SignedIn { name } => self.user_name = name,
            Event::SignedOut => {
                self.user_name.clear();
            }
            Event::Submit => self.error = None,
            Event::Completed(result) => self.result = Some(*result),
            Event::Failed(message) => self.error = Some(message),
            Event::StartOver => {
                self.input = FounderInput::default();
                self.result = None;
            }
            Event::Next | Event::Back | Event::Phase(_) => {}
        }
        self.page = next;
        Ok(())
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn confirm<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> Result<bool> {
    write!(writer, "{question} [y/N]: ")?;
    writer.flush()?;
    Ok(read_line(reader)?
        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(false))
}

enum StepOutcome {
    Done,
    Back,
    Eof,
}

fn fill_step<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    session: &mut Session,
    step: usize,
) -> Result<StepOutcome> {
    let form = STEPS[step];
    writeln!(writer)?;
    writeln!(writer, "Step {} of {}: {}", step + 1, STEPS.len(), form.label)?;
    for spec in form.fields {
        let current = session.input.get(spec.field);
        if current.is_empty() {
            write!(writer, "{} ({}): ", spec.label, spec.placeholder)?;
        } else {
            write!(writer, "{} [{}]: ", spec.label, current)?;
        }
        writer.flush()?;
        let Some(answer) = read_line(reader)? else {
            return Ok(StepOutcome::Eof);
        };
        if answer.trim() == BACK_COMMAND {
            return Ok(StepOutcome::Back);
        }
        // An empty line keeps what the field already holds.
        if !answer.is_empty() {
            session.input.set(spec.field, answer);
        }
    }
    Ok(StepOutcome::Done)
}

/// Drives one session until the user stops, returning the last result.
///
/// A failed analysis drops back to the last form step with every answer
/// kept. Input ending (EOF) on the landing page or mid-form returns
/// `Ok(None)`, unless the last submission failed, in which case that
/// failure is returned.
pub async fn run_interactive<R, W, S>(
    reader: &mut R,
    writer: &mut W,
    service: &S,
    weights: &BlendWeights,
) -> Result<Option<BlendedResult>>
where
    R: BufRead,
    W: Write,
    S: ReasoningService + ?Sized,
{
    let mut session = Session::default();
    let mut last_failure: Option<AppError> = None;

    writeln!(writer, "Startup idea evaluator: 1,000 point score, 5 dimensions.")?;
    write!(writer, "Your name: ")?;
    writer.flush()?;
    let Some(name) = read_line(reader)? else {
        return Ok(None);
    };
    session.dispatch(Event::SignedIn {
        name: name.trim().to_string(),
    })?;
    if !session.user_name.is_empty() {
        writeln!(writer, "Welcome, {}.", session.user_name)?;
    }

    loop {
        match session.page {
            Page::Form { step } => match fill_step(reader, writer, &mut session, step)? {
                StepOutcome::Eof => return last_failure.map_or(Ok(None), Err),
                StepOutcome::Back if step > 0 => session.dispatch(Event::Back)?,
                StepOutcome::Back => {}
                StepOutcome::Done if step < LAST_STEP => session.dispatch(Event::Next)?,
                StepOutcome::Done => session.dispatch(Event::Submit)?,
            },
            Page::Loading { .. } => {
                last_failure = None;
                let input = session.input.clone();
                let outcome = pipeline::evaluate(&input, service, weights, |phase| {
                    if let Err(e) = session.dispatch(Event::Phase(phase)) {
                        warn!(error = %e, "phase update rejected");
                    }
                    if let Err(e) = writeln!(writer, "... {}", phase.label()) {
                        warn!(error = %e, "progress line not written");
                    }
                })
                .await;

                match outcome {
                    Ok(result) => session.dispatch(Event::Completed(Box::new(result)))?,
                    Err(e) => {
                        error!(error = %e, "analysis failed");
                        session.dispatch(Event::Failed(ANALYSIS_FAILED.to_string()))?;
                        writeln!(writer, "{ANALYSIS_FAILED}")?;
                        last_failure = Some(e);
                    }
                }
            }
            Page::Results => {
                if let Some(result) = &session.result {
                    writeln!(writer)?;
                    writeln!(writer, "{}", report::md::to_markdown(result))?;
                }
                if confirm(reader, writer, "Evaluate another idea?")? {
                    session.dispatch(Event::StartOver)?;
                } else {
                    return Ok(session.result);
                }
            }
            Page::Landing => return Ok(None),
        }
    }
}
