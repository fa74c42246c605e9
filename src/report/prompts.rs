//! Prompt builders for the two generative calls.

use std::fmt::Write;

use crate::intake::{IntakeRecord, QAPair, RevenueBracket};

/// Fallback values substituted into prompts when an optional intake field is
/// absent. One map consulted by both builders.
#[derive(Debug, Clone)]
pub struct PromptDefaults {
    pub company_name: &'static str,
    pub tech_stack: &'static str,
    pub process_description: &'static str,
    pub company_size: &'static str,
    pub monthly_revenue: &'static str,
    pub job_title: &'static str,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            company_name: "A small business",
            tech_stack: "Basic tools like email, spreadsheets",
            process_description: "Looking to save time on daily tasks",
            company_size: "Small team",
            monthly_revenue: "Growing business",
            job_title: "Business Owner",
        }
    }
}

impl PromptDefaults {
    pub fn company_name(&self, intake: &IntakeRecord) -> String {
        non_blank(intake.company_name.as_deref()).unwrap_or(self.company_name).to_string()
    }

    pub fn tech_stack(&self, intake: &IntakeRecord) -> String {
        intake
            .tech_stack_label()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.tech_stack.to_string())
    }

    pub fn process_description(&self, intake: &IntakeRecord) -> String {
        non_blank(intake.process_description.as_deref())
            .unwrap_or(self.process_description)
            .to_string()
    }

    pub fn company_size(&self, intake: &IntakeRecord) -> String {
        intake
            .company_size
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| self.company_size.to_string())
    }

    pub fn monthly_revenue(&self, intake: &IntakeRecord) -> String {
        intake
            .monthly_revenue
            .map(|r| format!("{} ({})", r.label(), r.monthly_range()))
            .unwrap_or_else(|| self.monthly_revenue.to_string())
    }

    pub fn job_title(&self, intake: &IntakeRecord) -> String {
        non_blank(intake.job_title.as_deref()).unwrap_or(self.job_title).to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Persona for the first call: empathetic, non-technical discovery consultant.
pub fn questions_system_prompt() -> &'static str {
    "You are a friendly AI automation consultant helping small business owners discover \
     hidden inefficiencies. Your clients are NOT tech-savvy - they don't know what \
     automation platforms are. They just know their work feels repetitive and exhausting.\n\n\
     Your job is to ask 3 simple, conversational questions that help uncover:\n\
     1. What repetitive tasks eat up their time daily/weekly\n\
     2. Where information gets \"stuck\" or requires manual copying between systems\n\
     3. What frustrates them most about their current workflow\n\n\
     Make questions feel like a friendly conversation, not a technical interview. \
     Use everyday language. Focus on PAIN POINTS and TIME WASTERS.\n\n\
     Return ONLY a JSON object with a \"questions\" array containing exactly 3 strings. No markdown."
}

/// Data section for the first call, interpolating intake fields with defaults.
pub fn questions_user_prompt(intake: &IntakeRecord, defaults: &PromptDefaults) -> String {
    format!(
        "Business: {company}\n\
         What they currently use: {tools}\n\
         What they described: {description}\n\n\
         Generate 3 simple, friendly questions to understand their daily frustrations \
         and time-wasters.",
        company = defaults.company_name(intake),
        tools = defaults.tech_stack(intake),
        description = defaults.process_description(intake),
    )
}

/// Persona + output schema for the second call: persuasive solutions
/// consultant. Embeds the revenue-bracket savings table so the estimate is
/// scaled against known tiers rather than invented.
pub fn report_system_prompt() -> String {
    let mut savings_table = String::new();
    for bracket in RevenueBracket::ALL {
        let _ = writeln!(
            savings_table,
            "- {} ({}) = suggest savings {}",
            bracket.label(),
            bracket.monthly_range(),
            bracket.savings_range()
        );
    }

    format!(
        "You are a persuasive AI Solutions Consultant writing a discovery report that will \
         make business owners excited about automation. Your goal is to:\n\n\
         1. Make them realize how much time and money they're LOSING right now\n\
         2. Paint a vivid picture of what their business could look like with automation\n\
         3. Create urgency and curiosity to take the next step\n\n\
         Write in a conversational, exciting tone. Use SPECIFIC numbers (even estimates). \
         Compare their current state to a transformed future.\n\n\
         Return a JSON object with this structure:\n\
         {{\n\
           \"scope_title\": \"An exciting, benefit-focused headline\",\n\
           \"executive_summary\": \"2-3 punchy sentences with numbers\",\n\
           \"current_pain_points\": [\"three specific frustrations with time/money impact\"],\n\
           \"transformation_vision\": \"3-4 sentences describing the workday after automation\",\n\
           \"recommended_solution\": \"Plain-English description of what to automate\",\n\
           \"estimated_implementation_time\": \"e.g. '2-3 weeks'\",\n\
           \"estimated_cost_savings\": \"Specific annual figure scaled to their revenue\",\n\
           \"estimated_hours_saved\": \"Weekly hours freed up\",\n\
           \"quick_wins\": [\"three easy automation wins\"],\n\
           \"roi_breakdown\": \"One sentence explaining the math\",\n\
           \"next_steps\": [\"two clear action steps\"]\n\
         }}\n\n\
         Be realistic but paint an exciting picture. Use Indian Rupees (₹).\n\n\
         IMPORTANT: The Monthly Revenue provided is per MONTH, not per year. \
         Scale the savings estimate to the matching tier:\n{savings_table}"
    )
}

/// Data section for the second call: business profile, process description,
/// and the Q/A blocks in submission order.
pub fn report_user_prompt(
    intake: &IntakeRecord,
    qa_pairs: &[QAPair],
    defaults: &PromptDefaults,
) -> String {
    let qa_section = qa_pairs
        .iter()
        .map(|qa| format!("**Q:** {}\n**A:** {}", qa.question, qa.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "## Business Profile\n\
         - Company: {company}\n\
         - Team Size: {size}\n\
         - Monthly Revenue (per month): {revenue}\n\
         - Role: {role}\n\
         - Current Tools: {tools}\n\n\
         ## What They're Struggling With\n\
         {description}\n\n\
         ## Their Answers to Our Discovery Questions\n\
         {qa_section}\n\n\
         Create an exciting, persuasive analysis that makes them eager to automate their \
         business. Remember to scale the estimated savings appropriately based on their \
         MONTHLY revenue.",
        company = defaults.company_name(intake),
        size = defaults.company_size(intake),
        revenue = defaults.monthly_revenue(intake),
        role = defaults.job_title(intake),
        tools = defaults.tech_stack(intake),
        description = defaults.process_description(intake),
    )
}
