//! Diagnostic report model and its text rendering.

use crate::config::LayoutConfig;
use std::fmt;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Outcome of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// Informational; never fails the run.
    Warn,
    /// An expected artifact has not been produced yet. Shown as a warning,
    /// but fails the run.
    NotFound,
    Fail,
}

impl CheckStatus {
    pub fn is_failure(self) -> bool {
        matches!(self, CheckStatus::NotFound | CheckStatus::Fail)
    }

    fn icon(self) -> &'static str {
        match self {
            CheckStatus::Pass => "✅",
            CheckStatus::Warn | CheckStatus::NotFound => "⚠️ ",
            CheckStatus::Fail => "❌",
        }
    }
}

/// One reported line, with optional detail lines and a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: CheckStatus,
    pub message: String,
    pub details: Vec<String>,
    pub hint: Option<String>,
}

impl Finding {
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            hint: None,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::NotFound, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Findings from one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub findings: Vec<Finding>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            findings: Vec::new(),
        }
    }

    pub fn with(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn passed(&self) -> bool {
        !self.findings.iter().any(|f| f.status.is_failure())
    }
}

/// The whole diagnostic run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    /// True unless some finding is failure-level.
    pub fn passed(&self) -> bool {
        self.sections.iter().all(Section::passed)
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.sections.iter().flat_map(|s| s.findings.iter())
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    /// Write the human-readable report.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n🔍 Airtable Cache Setup Diagnostic\n")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        for (index, section) in self.sections.iter().enumerate() {
            writeln!(out, "\n[{}] {}...", index + 1, section.title)?;
            for finding in &section.findings {
                writeln!(out, "{}", finding)?;
            }
        }

        writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
        if self.passed() {
            writeln!(out, "✅ ALL CHECKS PASSED!\n")?;
            writeln!(out, "Your Airtable caching setup looks good.")?;
            writeln!(out, "\nNext steps:")?;
            writeln!(out, "1. Push your changes to GitHub")?;
            writeln!(
                out,
                "2. Add GitHub secrets (AIRTABLE_API_KEY, AIRTABLE_BASE_ID)"
            )?;
            writeln!(out, "3. Check Actions tab to verify workflows run")?;
            writeln!(out, "4. Test your site to confirm cache is being used\n")?;
        } else {
            writeln!(out, "❌ SOME CHECKS FAILED\n")?;
            writeln!(out, "Please address the issues above.")?;
            writeln!(
                out,
                "See {} for help.\n",
                LayoutConfig::TROUBLESHOOTING_DOC
            )?;
        }
        Ok(())
    }

    /// Render into a string.
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   {} {}", self.status.icon(), self.message)?;
        for line in &self.details {
            write!(f, "\n      - {}", line)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n   💡 {}", hint)?;
        }
        Ok(())
    }
}
