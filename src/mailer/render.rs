//! HTML rendering of the automation report for email delivery.

use std::fmt::Write;

use crate::intake::IntakeRecord;
use crate::mailer::Recipient;
use crate::report::AutomationReport;

/// Branding injected into the rendered document.
#[derive(Debug, Clone)]
pub struct Branding {
    pub brand_name: String,
    pub booking_url: String,
}

/// Escape text for interpolation into HTML.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the report as a single HTML document: header, 3-metric summary
/// row, ROI callout, pain points, transformation callout, quick wins,
/// recommendation, numbered next steps, booking footer.
pub fn render_report_html(report: &AutomationReport, branding: &Branding) -> String {
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<div style="background: #10b981; padding: 20px; text-align: center;">
    <h1 style="color: black; margin: 0;">{brand}</h1>
    <p style="color: black; margin: 5px 0 0 0;">AI Automation Analysis Report</p>
</div>
<div style="padding: 30px; background: #f9fafb;">
    <h2 style="color: #111; margin-top: 0;">{title}</h2>
    <p style="font-size: 16px; color: #374151;">{summary}</p>
    <div style="display: flex; gap: 10px; margin: 20px 0;">
        <div style="flex: 1; background: #10b981; padding: 15px; text-align: center; border: 2px solid black;">
            <p style="margin: 0; font-size: 12px; text-transform: uppercase;">Potential Savings</p>
            <p style="margin: 5px 0 0 0; font-size: 20px; font-weight: bold;">{savings}</p>
        </div>
        <div style="flex: 1; background: #38bdf8; padding: 15px; text-align: center; border: 2px solid black;">
            <p style="margin: 0; font-size: 12px; text-transform: uppercase;">Time Freed Up</p>
            <p style="margin: 5px 0 0 0; font-size: 20px; font-weight: bold;">{hours}</p>
        </div>
        <div style="flex: 1; background: #a78bfa; padding: 15px; text-align: center; border: 2px solid black;">
            <p style="margin: 0; font-size: 12px; text-transform: uppercase;">Implementation</p>
            <p style="margin: 5px 0 0 0; font-size: 20px; font-weight: bold;">{implementation}</p>
        </div>
    </div>
    <div style="background: #111827; color: white; padding: 15px; margin: 20px 0;">
        <p style="margin: 0; font-weight: bold;">{roi}</p>
    </div>
    <h3 style="color: #111; border-bottom: 3px solid #f43f5e; padding-bottom: 5px;">What's Costing You Right Now</h3>
"#,
        brand = escape_html(&branding.brand_name),
        title = escape_html(&report.scope_title),
        summary = escape_html(&report.executive_summary),
        savings = escape_html(&report.estimated_cost_savings),
        hours = escape_html(&report.estimated_hours_saved),
        implementation = escape_html(&report.estimated_implementation_time),
        roi = escape_html(&report.roi_breakdown),
    );

    for point in &report.current_pain_points {
        let _ = write!(
            html,
            r#"    <div style="border-left: 4px solid #f43f5e; padding: 10px; margin: 10px 0; background: #fef2f2;">
        <p style="margin: 0; color: #374151;">{}</p>
    </div>
"#,
            escape_html(point)
        );
    }

    let _ = write!(
        html,
        r#"    <h3 style="color: #111; border-bottom: 3px solid #10b981; padding-bottom: 5px;">Your Business After Automation</h3>
    <div style="background: #10b981; padding: 20px; border: 2px solid black;">
        <p style="margin: 0; font-size: 16px;">{vision}</p>
    </div>
    <h3 style="color: #111; border-bottom: 3px solid #fbbf24; padding-bottom: 5px;">Quick Wins We Can Deliver</h3>
"#,
        vision = escape_html(&report.transformation_vision),
    );

    for win in &report.quick_wins {
        let _ = write!(
            html,
            r#"    <div style="background: #fef3c7; padding: 10px; margin: 10px 0; border: 2px solid black;">
        <p style="margin: 0;"><strong>&#10003;</strong> {}</p>
    </div>
"#,
            escape_html(win)
        );
    }

    let _ = write!(
        html,
        r#"    <h3 style="color: #111; border-bottom: 3px solid #38bdf8; padding-bottom: 5px;">Our Recommendation</h3>
    <div style="background: #f0f9ff; padding: 20px; border: 2px solid black;">
        <p style="margin: 0; font-size: 16px;">{solution}</p>
    </div>
    <div style="background: #111827; color: white; padding: 20px; margin-top: 30px;">
        <h3 style="margin-top: 0; color: white;">Next Steps</h3>
"#,
        solution = escape_html(&report.recommended_solution),
    );

    for (idx, step) in report.next_steps.iter().enumerate() {
        let _ = write!(
            html,
            r#"        <p style="margin: 10px 0;">
            <span style="display: inline-block; width: 24px; height: 24px; background: #10b981; color: black; border-radius: 50%; text-align: center; line-height: 24px; font-weight: bold; margin-right: 10px;">{num}</span>
            {step}
        </p>
"#,
            num = idx + 1,
            step = escape_html(step)
        );
    }

    let booking = if branding.booking_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p style="color: #6b7280;">Reply to this email or book a call at <a href="{url}">{url}</a></p>"#,
            url = escape_html(&branding.booking_url)
        )
    };

    let _ = write!(
        html,
        r#"    </div>
    <div style="text-align: center; margin-top: 30px; padding: 20px;">
        <p style="font-size: 18px; font-weight: bold; color: #111;">Ready to transform your business?</p>
        {booking}
    </div>
</div>
<div style="background: #111827; color: white; padding: 15px; text-align: center;">
    <p style="margin: 0; font-size: 12px;">{brand} | AI Automation Solutions</p>
</div>
</div>
"#,
        brand = escape_html(&branding.brand_name),
    );

    html
}

/// Wrap the report for the internal lead notification: the lead's contact
/// details prepended above the full report.
pub fn render_lead_notification_html(
    recipient: &Recipient,
    intake: &IntakeRecord,
    report_html: &str,
) -> String {
    let name = match recipient.name.trim() {
        "" => "(not provided)",
        name => name,
    };
    format!(
        "<h2>New AI Automation Analysis Request</h2>\n\
         <p><strong>Client Name:</strong> {name}</p>\n\
         <p><strong>Company:</strong> {company}</p>\n\
         <p><strong>Client Email:</strong> {email}</p>\n\
         <p><strong>Client Phone:</strong> {phone}</p>\n\
         <hr/>\n\
         {report_html}",
        name = escape_html(name),
        company = escape_html(intake.company_name.as_deref().unwrap_or("(not provided)")),
        email = escape_html(&recipient.email),
        phone = escape_html(&intake.phone),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding() -> Branding {
        Branding {
            brand_name: "Leadflow".to_string(),
            booking_url: "https://cal.example.com/30min".to_string(),
        }
    }

    fn report() -> AutomationReport {
        AutomationReport {
            scope_title: "Reclaim 15 Hours".to_string(),
            executive_summary: "You lose time.".to_string(),
            current_pain_points: vec!["Manual entry".into(), "Copy-paste".into(), "Chasing".into()],
            transformation_vision: "Calm mornings.".to_string(),
            recommended_solution: "Automate intake.".to_string(),
            estimated_implementation_time: "2-3 weeks".to_string(),
            estimated_cost_savings: "₹4,50,000/year".to_string(),
            estimated_hours_saved: "15 hours/week".to_string(),
            quick_wins: vec!["Auto-replies".into()],
            roi_breakdown: "X times Y.".to_string(),
            next_steps: vec!["Book a call".into(), "Pick a pilot".into()],
        }
    }

    #[test]
    fn report_html_contains_all_sections() {
        let html = render_report_html(&report(), &branding());
        assert!(html.contains("Reclaim 15 Hours"));
        assert!(html.contains("₹4,50,000/year"));
        assert!(html.contains("15 hours/week"));
        assert!(html.contains("2-3 weeks"));
        assert!(html.contains("Manual entry"));
        assert!(html.contains("Calm mornings."));
        assert!(html.contains("Auto-replies"));
        assert!(html.contains("Automate intake."));
        assert!(html.contains("Book a call"));
        assert!(html.contains("https://cal.example.com/30min"));
        assert!(html.contains("Leadflow"));
    }

    #[test]
    fn next_steps_are_numbered() {
        let html = render_report_html(&report(), &branding());
        assert!(html.contains(">1</span>"));
        assert!(html.contains(">2</span>"));
    }

    #[test]
    fn html_is_escaped() {
        let mut r = report();
        r.scope_title = "<script>alert(1)</script>".to_string();
        let html = render_report_html(&r, &branding());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_lists_render_without_items() {
        let mut r = report();
        r.quick_wins.clear();
        r.next_steps.clear();
        let html = render_report_html(&r, &branding());
        assert!(html.contains("Quick Wins We Can Deliver"));
        assert!(!html.contains("&#10003;"));
    }

    #[test]
    fn notification_prepends_contact_details() {
        let recipient = Recipient {
            email: "lead@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
        };
        let intake = IntakeRecord {
            email: "lead@example.com".to_string(),
            phone: "12345".to_string(),
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };
        let html = render_lead_notification_html(&recipient, &intake, "<div>report</div>");
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("lead@example.com"));
        assert!(html.contains("Acme"));
        assert!(html.contains("12345"));
        assert!(html.contains("<div>report</div>"));
    }

    #[test]
    fn notification_marks_a_missing_name() {
        let recipient = Recipient {
            email: "lead@example.com".to_string(),
            name: String::new(),
        };
        let intake = IntakeRecord {
            email: "lead@example.com".to_string(),
            phone: "12345".to_string(),
            ..Default::default()
        };
        let html = render_lead_notification_html(&recipient, &intake, "");
        assert!(html.contains("<strong>Client Name:</strong> (not provided)"));
        assert!(html.contains("<strong>Company:</strong> (not provided)"));
    }

    #[test]
    fn missing_booking_url_omits_link() {
        let b = Branding {
            brand_name: "Leadflow".to_string(),
            booking_url: String::new(),
        };
        let html = render_report_html(&report(), &b);
        assert!(!html.contains("book a call at"));
    }
}
