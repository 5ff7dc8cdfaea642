use crate::infra::{definition_source, read_answers};
use career_survey::config::AppConfig;
use career_survey::error::AppError;
use career_survey::workflows::survey::{
    JobRecommendation, ReasonSynthesizer, SpecCheckResult, SpecCheckSubmission, SurveyResult,
    SurveyService, SurveySubmission,
};
use clap::{Args, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Survey slug, or the job category when `--spec-check` is set
    #[arg(long)]
    pub(crate) survey: String,
    /// JSON object mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Score a spec-check survey instead of a general one
    #[arg(long)]
    pub(crate) spec_check: bool,
    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Directory searched for survey definitions; repeat to search several
    #[arg(long = "data-dir")]
    pub(crate) data_dirs: Vec<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        survey,
        answers,
        spec_check,
        format,
        data_dirs,
    } = args;

    let config = AppConfig::load()?;
    let source = definition_source(&config.surveys, data_dirs);
    let service = SurveyService::new(Arc::new(source), ReasonSynthesizer::default());
    let answers = read_answers(&answers)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if spec_check {
        let result = service.submit_spec_check(SpecCheckSubmission {
            job_category: survey,
            answers,
            user_id: None,
        })?;
        match format {
            OutputFormat::Text => render_spec_check_text(&mut out, &result),
            OutputFormat::Csv => render_spec_check_csv(&mut out, &result),
        }
    } else {
        let result = service.submit_general(SurveySubmission {
            survey_id: survey,
            answers,
            user_id: None,
        })?;
        match format {
            OutputFormat::Text => render_general_text(&mut out, &result),
            OutputFormat::Csv => render_general_csv(&mut out, &result),
        }
    }
}

pub(crate) fn render_general_text<W: Write>(
    out: &mut W,
    result: &SurveyResult,
) -> Result<(), AppError> {
    let recommended = &result.recommended_job;
    writeln!(out, "Career survey {}", result.survey_id)?;
    writeln!(
        out,
        "Submitted {} | {} questions",
        result.submitted_at.format("%Y-%m-%d %H:%M"),
        result.total_questions
    )?;
    writeln!(
        out,
        "\nRecommended: {}{} (score {:.2})",
        recommended
            .icon
            .as_deref()
            .map(|icon| format!("{icon} "))
            .unwrap_or_default(),
        recommended.name,
        recommended.score
    )?;
    if let Some(reason) = &recommended.reason {
        writeln!(out, "  {reason}")?;
    }

    write_shortlist(out, "Preference top 3", &result.preference_top3)?;
    write_shortlist(out, "Fit top 3", &result.fit_top3)?;
    write_insights(out, &result.insights)
}

fn write_shortlist<W: Write>(
    out: &mut W,
    title: &str,
    entries: &[JobRecommendation],
) -> Result<(), AppError> {
    writeln!(out, "\n{title}")?;
    for entry in entries {
        writeln!(out, "{}. {} ({:.2})", entry.rank, entry.name, entry.score)?;
    }
    Ok(())
}

pub(crate) fn render_spec_check_text<W: Write>(
    out: &mut W,
    result: &SpecCheckResult,
) -> Result<(), AppError> {
    let recommended = &result.recommended_specialization;
    writeln!(out, "Spec check {}", result.job_category)?;
    writeln!(
        out,
        "Submitted {} | {} questions",
        result.submitted_at.format("%Y-%m-%d %H:%M"),
        result.total_questions
    )?;
    writeln!(
        out,
        "\nRecommended: {} (score {:.2})",
        recommended.name, recommended.score
    )?;
    if let Some(reason) = &recommended.reason {
        writeln!(out, "  {reason}")?;
    }

    writeln!(out, "\nSpecializations")?;
    for (index, entry) in result.top_specializations.iter().enumerate() {
        writeln!(out, "{}. {} ({:.2})", index + 1, entry.name, entry.score)?;
    }
    write_insights(out, &result.insights)
}

fn write_insights<W: Write>(out: &mut W, insights: &[String]) -> Result<(), AppError> {
    writeln!(out, "\nInsights")?;
    for insight in insights {
        writeln!(out, "- {insight}")?;
    }
    Ok(())
}

/// One row per declared job category, in declaration order.
pub(crate) fn render_general_csv<W: Write>(
    out: &mut W,
    result: &SurveyResult,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["job_id", "score", "recommended"])
        .map_err(csv_error)?;
    for (job_id, score) in &result.job_scores {
        let recommended = *job_id == result.recommended_job.job_id;
        writer
            .write_record([
                job_id.as_str(),
                format!("{score:.2}").as_str(),
                if recommended { "true" } else { "false" },
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per specialization, best first.
pub(crate) fn render_spec_check_csv<W: Write>(
    out: &mut W,
    result: &SpecCheckResult,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["rank", "subtype_id", "name", "score"])
        .map_err(csv_error)?;
    for (index, entry) in result.top_specializations.iter().enumerate() {
        writer
            .write_record([
                (index + 1).to_string().as_str(),
                entry.subtype_id.as_str(),
                entry.name.as_str(),
                format!("{:.2}", entry.score).as_str(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Render(format!("failed to write csv: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_survey::workflows::survey::{AnswerSet, InMemoryDefinitionSource};
    use serde_json::json;

    fn service() -> SurveyService<InMemoryDefinitionSource> {
        let source = InMemoryDefinitionSource::new()
            .with_document(
                "survey-general",
                json!({
                    "questions": [
                        { "id": "q1", "category": "analytical", "weights": { "data": 1.0, "ops": 0.5 } }
                    ],
                    "job_categories": [
                        { "id": "data", "name": "Data Analyst", "icon": "📊" },
                        { "id": "ops", "name": "Operations" }
                    ]
                }),
            )
            .with_document(
                "spec-check-data",
                json!({
                    "job_category": "data",
                    "subtypes": [
                        { "id": "bi", "name": "BI Analyst" },
                        { "id": "ml", "name": "ML Engineer" }
                    ],
                    "questions": [
                        { "id": "s1", "text": "Built a dashboard", "weights": { "bi": 1.0 } }
                    ]
                }),
            );
        SurveyService::new(Arc::new(source), ReasonSynthesizer::default())
    }

    fn general_result() -> SurveyResult {
        service()
            .submit_general(SurveySubmission {
                survey_id: "survey-general".to_string(),
                answers: AnswerSet::new().with("q1", json!(4)),
                user_id: None,
            })
            .expect("scores")
    }

    fn spec_check_result() -> SpecCheckResult {
        service()
            .submit_spec_check(SpecCheckSubmission {
                job_category: "data".to_string(),
                answers: AnswerSet::new().with("s1", json!(3)),
                user_id: None,
            })
            .expect("scores")
    }

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> Result<(), AppError>) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer).expect("renders");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn general_csv_lists_every_job_in_declaration_order() {
        let result = general_result();
        let output = rendered(|out| render_general_csv(out, &result));

        assert_eq!(
            output,
            "job_id,score,recommended\ndata,100.00,true\nops,50.00,false\n"
        );
    }

    #[test]
    fn spec_check_csv_ranks_specializations() {
        let result = spec_check_result();
        let output = rendered(|out| render_spec_check_csv(out, &result));

        assert_eq!(
            output,
            "rank,subtype_id,name,score\n1,bi,BI Analyst,100.00\n2,ml,ML Engineer,0.00\n"
        );
    }

    #[test]
    fn general_text_names_recommendation_and_reason() {
        let result = general_result();
        let output = rendered(|out| render_general_text(out, &result));

        assert!(output.contains("Recommended: 📊 Data Analyst (score 100.00)"));
        assert!(output.contains("You scored highest on Data analysis"));
        assert!(output.contains("1. Data Analyst (100.00)"));
        assert!(output.contains("2. Operations (50.00)"));
    }

    #[test]
    fn spec_check_text_lists_insights() {
        let result = spec_check_result();
        let output = rendered(|out| render_spec_check_text(out, &result));

        assert!(output.contains("Spec check data"));
        assert!(output.contains("Recommended: BI Analyst (score 100.00)"));
        assert!(output.contains("- BI Analyst recorded the highest score among the specializations."));
    }
}
