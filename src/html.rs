//! HTML rendering for the page routes. Plain string templates, no engine.

use std::collections::BTreeMap;

use crate::models::Record;

const TABLE_CLASS: &str = "table table-bordered table-hover";

/// Wraps page content in the shared shell with the nav bar.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Game Stats</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body>
    <nav class="navbar navbar-expand navbar-dark bg-dark mb-4">
        <div class="container">
            <a class="navbar-brand" href="/">Game Stats</a>
            <div class="navbar-nav">
                <a class="nav-link" href="/">Home</a>
                <a class="nav-link" href="/data/">Data</a>
                <a class="nav-link" href="/image">Chart</a>
                <a class="nav-link" href="/about">About</a>
            </div>
        </div>
    </nav>
    <main class="container">
{content}
    </main>
</body>
</html>
"#
    )
}

pub fn placeholder(message: &str) -> String {
    format!("<p class=\"text-muted\">{}</p>", escape(message))
}

/// Year/count statistics as a two-column table, sorted by year.
pub fn stats_table(stats: &BTreeMap<i32, u64>) -> String {
    let mut rows = String::new();
    for (year, count) in stats {
        rows.push_str(&format!(
            "        <tr><td>{year}</td><td>{count}</td></tr>\n"
        ));
    }

    format!(
        "<table class=\"{TABLE_CLASS}\">\n\
             <thead><tr><th>Year</th><th>Number of Games</th></tr></thead>\n\
             <tbody>\n{rows}    </tbody>\n</table>"
    )
}

/// Raw records as an eight-column table, one row per record.
pub fn records_table(records: &[Record]) -> String {
    let mut rows = String::new();
    for record in records {
        rows.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.title),
            record.score,
            escape(&record.score_phrase),
            escape(&record.platform),
            escape(&record.genre),
            record.release_year,
            record.release_month,
            record.release_day,
        ));
    }

    format!(
        "<table class=\"{TABLE_CLASS}\">\n\
             <thead><tr>\
         <th>title</th><th>score</th><th>score_phrase</th><th>platform</th>\
         <th>genre</th><th>release_year</th><th>release_month</th><th>release_day</th>\
         </tr></thead>\n\
             <tbody>\n{rows}    </tbody>\n</table>"
    )
}

pub fn about() -> String {
    r#"<h1>About</h1>
<p>This service downloads a CSV dataset of video-game reviews, caches the
parsed records in Redis, and shows how many games were released per year on
the 15 most common platforms.</p>
<p>The raw dataset is available at <a href="/json-dataset">/json-dataset</a>
and the aggregated statistics at <a href="/json-stats">/json-stats</a>.</p>"#
        .to_string()
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
