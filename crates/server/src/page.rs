//! Server-rendered availability board page.
//!
//! The page reloads itself on a timer, so each reload re-runs the sheet
//! fetches. The slideshow and responsive tweaks are small inline scripts.

use configs::PageConfig;
use models::board::{Board, DayDetail, DayStatus, DaySummary, Section, StyledCell};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON for inlining into a `<script>` block.
fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn styled_td(cell: &StyledCell, align: &str) -> String {
    let color = cell.style.map(|s| format!(" {}", s.css())).unwrap_or_default();
    format!(
        r#"<td style="padding: 8px; text-align: {align};{color}">{}</td>"#,
        escape_html(&cell.text)
    )
}

fn render_summary(summary: &Section<Vec<DaySummary>>) -> String {
    let days = match summary {
        Section::Failed(msg) => return format!(r#"<p class="error">{}</p>"#, escape_html(msg)),
        Section::Ready(days) => days,
    };
    if days.is_empty() {
        return r#"<p class="muted">予約データがありません。</p>"#.to_string();
    }
    days.iter()
        .map(|day| {
            let slots: String = day
                .slots
                .iter()
                .map(|s| {
                    format!(
                        "<li>{} 残り {} 席（{}/{}）</li>",
                        escape_html(&s.time),
                        s.remaining,
                        s.reserved,
                        s.capacity
                    )
                })
                .collect();
            format!(
                r#"<div class="summary-day"><h4>{}</h4><ul>{slots}</ul></div>"#,
                escape_html(&day.label)
            )
        })
        .collect()
}

fn render_status(status: &DayStatus) -> String {
    let rows: String = status
        .rows
        .iter()
        .map(|r| {
            format!(
                r#"<tr style="border-bottom: 1px solid #ddd;"><td style="padding: 8px; text-align: left;">{}</td>{}</tr>"#,
                escape_html(&r.category),
                styled_td(&r.cell, "center")
            )
        })
        .collect();
    format!(
        r#"<div class="day"><h3>{}</h3><table class="status-table" style="border-collapse: collapse; width: 100%;">{rows}</table></div>"#,
        escape_html(&status.title)
    )
}

fn render_detail(index: usize, detail: &DayDetail) -> String {
    let body = match &detail.table {
        Section::Failed(msg) => format!(r#"<p class="error">{}</p>"#, escape_html(msg)),
        Section::Ready(rows) => {
            let rows: String = rows
                .iter()
                .map(|row| {
                    let cells: String = row.iter().map(|c| styled_td(c, "center")).collect();
                    format!(r#"<tr style="border-bottom: 1px solid #ddd;">{cells}</tr>"#)
                })
                .collect();
            format!(
                r#"<h3>{}</h3><table class="sheet-table" style="border-collapse: collapse; width: 100%;">{rows}</table>"#,
                escape_html(&detail.title)
            )
        }
    };
    format!(r#"<section class="card" id="sheet-day{}">{body}</section>"#, index + 1)
}

fn reload_script(cfg: &PageConfig) -> String {
    format!("setInterval(() => {{ location.reload(); }}, {});", cfg.reload_interval_secs * 1000)
}

fn slideshow_script(cfg: &PageConfig) -> String {
    let captions: Vec<&str> = cfg.slides.iter().map(|s| s.caption.as_str()).collect();
    format!(
        r#"document.addEventListener('DOMContentLoaded', () => {{
  const slides = document.querySelectorAll('.slide');
  const captions = {captions};
  const captionElement = document.querySelector('.hero-caption');
  let slideIndex = 0;
  function showSlides() {{
    if (slides.length === 0) return;
    slides.forEach((slide, index) => {{
      slide.style.display = index === slideIndex ? 'block' : 'none';
    }});
    if (captionElement) captionElement.textContent = captions[slideIndex] || '';
    slideIndex = (slideIndex + 1) % slides.length;
    setTimeout(showSlides, {interval});
  }}
  showSlides();
}});"#,
        captions = script_json(&captions),
        interval = cfg.slide_interval_ms,
    )
}

fn layout_script(cfg: &PageConfig) -> String {
    format!(
        r#"document.addEventListener('DOMContentLoaded', () => {{
  const cards = document.querySelectorAll('.card');
  const header = document.querySelector('.site-header');
  function adjustWidth() {{
    const narrow = window.innerWidth <= {breakpoint};
    cards.forEach(card => {{
      card.style.width = narrow ? '100%' : '';
      card.style.margin = narrow ? '0 auto' : '';
    }});
    if (header) header.style.width = narrow ? '100%' : '';
  }}
  adjustWidth();
  window.addEventListener('resize', adjustWidth);
}});"#,
        breakpoint = cfg.breakpoint_px,
    )
}

/// Full HTML document for the board.
pub fn render_board(board: &Board, cfg: &PageConfig) -> String {
    let slides: String = cfg
        .slides
        .iter()
        .map(|s| {
            format!(
                r#"<img class="slide" src="{}" alt="{}" style="display: none; width: 100%;">"#,
                escape_html(&s.image),
                escape_html(&s.caption)
            )
        })
        .collect();
    let status: String = board.status.iter().map(render_status).collect();
    let details: String = board
        .details
        .iter()
        .enumerate()
        .map(|(i, d)| render_detail(i, d))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem; }}
        .card {{ border: 1px solid #dee2e6; border-radius: 0.5rem; padding: 1rem; margin: 1rem 0; }}
        .error {{ color: #721c24; }}
        .muted {{ color: #6c757d; }}
    </style>
    <script>{reload}</script>
    <script>{slideshow}</script>
    <script>{layout}</script>
</head>
<body>
    <header class="site-header"><h1>{title}</h1></header>
    <section class="hero">{slides}<p class="hero-caption"></p></section>
    <section class="card">
        <h2>予約状況</h2>
        <div id="status-list">{status}</div>
        <div id="summary-list" data-source="{source}">{summary}</div>
        <p><a id="reserve-link" href="{form}" target="_blank" rel="noopener noreferrer">予約フォームを開く</a></p>
    </section>
    {details}
</body>
</html>"#,
        title = escape_html(&cfg.title),
        reload = reload_script(cfg),
        slideshow = slideshow_script(cfg),
        layout = layout_script(cfg),
        slides = slides,
        status = status,
        source = escape_html(&board.source),
        summary = render_summary(&board.summary),
        form = escape_html(&cfg.reserve_form_url),
        details = details,
    )
}
