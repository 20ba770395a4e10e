//! HTML summary of extracted tasks, ready to be mailed or opened in a browser

use chrono::{NaiveDate, NaiveDateTime};

use crate::extraction::{ExtractionResult, TaskRecord};
use crate::report::urgency::{days_remaining, Urgency};

const STYLE: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        line-height: 1.6;
        color: #333;
        max-width: 800px;
        margin: 0 auto;
        padding: 20px;
        background-color: #f5f5f5;
    }
    .container { background-color: white; border-radius: 8px; padding: 30px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }
    h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
    h2 { color: #e74c3c; margin-top: 30px; border-left: 4px solid #e74c3c; padding-left: 10px; }
    .metadata { background-color: #ecf0f1; padding: 15px; border-radius: 5px; margin: 20px 0; }
    .task { background-color: #fff; border-left: 4px solid #3498db; padding: 15px; margin: 15px 0; border-radius: 4px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
    .task-urgent { border-left-color: #e74c3c; background-color: #ffebee; }
    .task-number { background-color: #3498db; color: white; padding: 5px 10px; border-radius: 50%; font-weight: bold; display: inline-block; margin-right: 10px; min-width: 25px; text-align: center; }
    .task-text { font-size: 16px; font-weight: bold; }
    .deadline { background-color: #fff3cd; border: 1px solid #ffc107; padding: 10px; margin: 10px 0; border-radius: 4px; font-weight: bold; }
    .deadline-urgent { background-color: #ffebee; border-color: #e74c3c; color: #c62828; }
    .context { font-size: 13px; color: #7f8c8d; font-style: italic; margin-top: 8px; padding: 8px; background-color: #f8f9fa; border-radius: 3px; }
    .empty { text-align: center; padding: 40px; color: #7f8c8d; }
    .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #ecf0f1; text-align: center; color: #7f8c8d; }
"#;

/// Render the summary page for one extraction run.
///
/// `today` drives the urgency bands; `generated_at` is only displayed.
/// Tasks with a deadline come first, numbering continues into the section
/// of tasks without one.
pub fn render_summary(
    result: &ExtractionResult,
    source: &str,
    today: NaiveDate,
    generated_at: NaiveDateTime,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<h1>📋 Suas Tarefas da Reunião</h1>\n");

    html.push_str("<div class=\"metadata\">\n");
    html.push_str(&format!(
        "<strong>📁 Origem:</strong> {}<br>\n",
        escape_html(source)
    ));
    html.push_str(&format!(
        "<strong>📅 Processado em:</strong> {}<br>\n",
        generated_at.format("%d/%m/%Y às %H:%M")
    ));
    html.push_str(&format!(
        "<strong>✅ Total de tarefas:</strong> {}<br>\n",
        result.total
    ));
    html.push_str(&format!(
        "<strong>⏰ Com prazo:</strong> {} | <strong>📝 Sem prazo:</strong> {}\n",
        result.with_deadline, result.without_deadline
    ));
    html.push_str("</div>\n");

    let mut number = 0;

    if result.with_deadline > 0 {
        html.push_str("<h2>⏰ Tarefas com prazo (prioridade!)</h2>\n");
        for task in result.with_deadlines() {
            number += 1;
            render_task(&mut html, number, task, today);
        }
    }

    if result.without_deadline > 0 {
        html.push_str("<h2>📝 Outras tarefas</h2>\n");
        for task in result.without_deadlines() {
            number += 1;
            render_task(&mut html, number, task, today);
        }
    }

    if result.is_empty() {
        html.push_str("<div class=\"empty\">\n");
        html.push_str("<h3>🎉 Nenhuma tarefa identificada!</h3>\n");
        html.push_str("<p>Ou as tarefas não foram claramente atribuídas na transcrição.</p>\n");
        html.push_str("</div>\n");
    }

    html.push_str("<div class=\"footer\">\n");
    html.push_str(&format!(
        "Gerado automaticamente pelo {} {}<br>\n",
        crate::APP_NAME,
        crate::VERSION
    ));
    html.push_str("<small>⏰ Tarefas com prazo podem ser exportadas para a agenda</small>\n");
    html.push_str("</div>\n</div>\n</body>\n</html>\n");

    html
}

/// Subject line to go with [`render_summary`]
pub fn summary_subject(result: &ExtractionResult, today: NaiveDate) -> String {
    format!(
        "📋 Suas Tarefas - {} tarefa(s) - {}",
        result.total,
        today.format("%d/%m/%Y")
    )
}

fn render_task(html: &mut String, number: usize, task: &TaskRecord, today: NaiveDate) {
    let urgency = task
        .deadline
        .as_ref()
        .map(|deadline| Urgency::classify(deadline.date, today));
    let urgent = urgency.map(|u| u.is_urgent()).unwrap_or(false);

    html.push_str(&format!(
        "<div class=\"task{}\">\n",
        if urgent { " task-urgent" } else { "" }
    ));
    html.push_str(&format!(
        "<div><span class=\"task-number\">{}</span><span class=\"task-text\">{}</span></div>\n",
        number,
        escape_html(&task.text)
    ));

    if let (Some(deadline), Some(urgency)) = (&task.deadline, urgency) {
        let time = deadline
            .time_label()
            .map(|t| format!(" às {}", t))
            .unwrap_or_default();
        html.push_str(&format!(
            "<div class=\"deadline{}\">⏰ {}{}</div>\n",
            if urgent { " deadline-urgent" } else { "" },
            urgency_label(urgency, deadline.date, today),
            time
        ));
    }

    if !task.context.is_empty() {
        html.push_str(&format!(
            "<div class=\"context\">💬 Contexto: {}</div>\n",
            escape_html(&task.context)
        ));
    }

    html.push_str("</div>\n");
}

fn urgency_label(urgency: Urgency, date: NaiveDate, today: NaiveDate) -> String {
    let formatted = date.format("%d/%m/%Y");
    let days = days_remaining(date, today);
    match urgency {
        Urgency::Overdue => "🚨 VENCEU ou VENCE HOJE!".to_string(),
        Urgency::Tomorrow => format!("⚠️ AMANHÃ ({})", formatted),
        Urgency::Soon => format!("⚠️ Em {} dias ({})", days, formatted),
        Urgency::Later => format!("📅 {} (em {} dias)", formatted, days),
    }
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
