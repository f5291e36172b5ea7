use std::fmt;

use crate::client::FileHandle;
use crate::humanize::ByteSize;
use crate::session::{ConversionSession, SessionStatus};

/// Render-ready snapshot of a widget
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterView {
    pub title: String,
    pub description: String,
    pub input: InputSummary,
    pub option_label: String,
    pub options: Vec<OptionChoice>,
    pub state: ViewState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputSummary {
    /// Nothing selected yet; `prompt` invites input
    Nothing { prompt: String },
    Files(Vec<FileSummary>),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size: ByteSize,
}

impl From<&FileHandle> for FileSummary {
    fn from(file: &FileHandle) -> Self {
        Self {
            name: file.name().to_string(),
            size: file.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Empty,
    Ready { can_submit: bool },
    Converting,
    Failed { message: String },
    Done { download_name: String, size: ByteSize },
}

impl ConverterView {
    pub(crate) fn build(
        session: &ConversionSession,
        can_submit: bool,
        download_name: Option<String>,
    ) -> Self {
        let tool = session.tool();

        let input = if tool.is_url_tool() {
            match session.url() {
                Some(url) => InputSummary::Url(url.to_string()),
                None => InputSummary::Nothing {
                    prompt: "Paste a video URL".to_string(),
                },
            }
        } else if session.files().is_empty() {
            let prompt = if tool.multiple {
                "Click to upload or drag and drop files"
            } else {
                "Click to upload or drag and drop"
            };
            InputSummary::Nothing {
                prompt: prompt.to_string(),
            }
        } else {
            InputSummary::Files(session.files().iter().map(FileSummary::from).collect())
        };

        let options = tool
            .options
            .iter()
            .map(|opt| OptionChoice {
                value: opt.value.clone(),
                label: opt.label.clone(),
                selected: session.selected_option() == Some(opt.value.as_str()),
            })
            .collect();

        let state = match session.status() {
            SessionStatus::Converting => ViewState::Converting,
            SessionStatus::Error(message) => ViewState::Failed {
                message: message.clone(),
            },
            SessionStatus::Success(artifact) => ViewState::Done {
                download_name: download_name.unwrap_or_default(),
                size: ByteSize(artifact.len() as u64),
            },
            SessionStatus::Idle if !session.has_input() => ViewState::Empty,
            SessionStatus::Idle => ViewState::Ready { can_submit },
        };

        Self {
            title: tool.title.clone(),
            description: tool.description.clone(),
            input,
            option_label: tool.option_label.clone(),
            options,
            state,
        }
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.size.as_megabytes())
    }
}

impl fmt::Display for ConverterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }

        match &self.input {
            InputSummary::Nothing { prompt } => writeln!(f, "  {prompt}")?,
            InputSummary::Url(url) => writeln!(f, "  URL: {url}")?,
            InputSummary::Files(files) => {
                for file in files {
                    writeln!(f, "  - {file}")?;
                }
            }
        }

        if !self.options.is_empty() {
            let choices: Vec<String> = self
                .options
                .iter()
                .map(|opt| {
                    if opt.selected {
                        format!("[{}]", opt.label)
                    } else {
                        opt.label.clone()
                    }
                })
                .collect();
            writeln!(f, "  {} {}", self.option_label, choices.join(" "))?;
        }

        match &self.state {
            ViewState::Empty => Ok(()),
            ViewState::Ready { can_submit: true } => writeln!(f, "  Ready to convert"),
            ViewState::Ready { can_submit: false } => Ok(()),
            ViewState::Converting => writeln!(f, "  Converting..."),
            ViewState::Failed { message } => writeln!(f, "  Error: {message}"),
            ViewState::Done {
                download_name,
                size,
            } => writeln!(
                f,
                "  Conversion complete: {download_name} ({})",
                size.as_megabytes()
            ),
        }
    }
}
