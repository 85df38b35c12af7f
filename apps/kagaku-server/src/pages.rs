//! Server-rendered HTML pages.
//!
//! The markup is deliberately plain: a search form that calls the JSON
//! API from a small inline script, and a detail view whose answer is
//! fetched lazily when the toggle button is pressed. Every dynamic
//! value is escaped before interpolation.

use kagaku_core::types::Problem;

const PAGE_STYLE: &str = r#"
    body { font-family: sans-serif; margin: 2rem auto; max-width: 920px; padding: 0 1rem; line-height: 1.6; }
    input[type=text] { width: 100%; padding: 0.7rem; font-size: 1rem; box-sizing: border-box; }
    .filters { display: flex; gap: 0.5rem; margin-top: 0.5rem; }
    .filters input { flex: 1; font-size: 0.9rem; padding: 0.5rem; }
    button { padding: 0.6rem 1rem; cursor: pointer; margin-top: 0.5rem; }
    .result { border: 1px solid #ddd; border-radius: 8px; padding: 0.8rem 1rem; margin: 0.7rem 0; }
    .tags { color: #445; font-size: 0.9rem; }
    .muted { color: #666; font-size: 0.9rem; }
    a { color: #0b57d0; text-decoration: none; }
    a:hover { text-decoration: underline; }
    pre { white-space: pre-wrap; }
"#;

const SEARCH_BODY: &str = r#"<h1>化学問題 意味検索</h1>
<p class="muted">自然言語で検索すると、類似度の高い問題を最大10件表示します。source / tags / concepts で絞り込みできます。</p>
<input id="query" type="text" placeholder="例: 気体の状態方程式が必要になる問題を探して" />
<div class="filters">
  <input id="source" type="text" placeholder="source（完全一致）" />
  <input id="tags" type="text" placeholder="tags（カンマ区切り）" />
  <input id="concepts" type="text" placeholder="concepts（カンマ区切り）" />
</div>
<button id="searchBtn">検索</button>
<div id="resultInfo" class="muted"></div>
<div id="results"></div>
<script>
const queryInput = document.getElementById('query');
const resultsEl = document.getElementById('results');
const infoEl = document.getElementById('resultInfo');

function renderResults(query, items) {
  infoEl.textContent = `クエリ: ${query} / ${items.length}件`;
  resultsEl.innerHTML = '';
  if (!items.length) {
    const p = document.createElement('p');
    p.textContent = '該当する問題が見つかりませんでした。';
    resultsEl.appendChild(p);
    return;
  }
  for (const item of items) {
    const div = document.createElement('div');
    div.className = 'result';
    const link = document.createElement('a');
    link.href = `/problems/${encodeURIComponent(item.id)}`;
    const strong = document.createElement('strong');
    strong.textContent = item.title;
    link.appendChild(strong);
    const tagLine = document.createElement('span');
    tagLine.className = 'tags';
    tagLine.textContent = `tags: ${(item.tags || []).join(', ')} / source: ${item.source}`;
    const scoreLine = document.createElement('span');
    scoreLine.className = 'muted';
    scoreLine.textContent = `score: ${item.score.toFixed(6)}`;
    div.appendChild(link);
    div.appendChild(document.createElement('br'));
    div.appendChild(tagLine);
    div.appendChild(document.createElement('br'));
    div.appendChild(scoreLine);
    resultsEl.appendChild(div);
  }
}

async function runSearch() {
  const params = new URLSearchParams();
  params.set('q', queryInput.value.trim());
  for (const key of ['source', 'tags', 'concepts']) {
    const value = document.getElementById(key).value.trim();
    if (value) params.set(key, value);
  }
  const res = await fetch(`/api/search?${params}`);
  const data = await res.json();
  renderResults(data.query, data.results || []);
}

document.getElementById('searchBtn').addEventListener('click', runSearch);
queryInput.addEventListener('keydown', (e) => {
  if (e.key === 'Enter') runSearch();
});
</script>"#;

// The problem id is recovered from the URL instead of being templated
// into the script, so no dynamic value ever lands inside JS.
const ANSWER_SCRIPT: &str = r#"<script>
const btn = document.getElementById('toggleAnswer');
const wrap = document.getElementById('answerWrap');
const ans = document.getElementById('answerText');
const problemId = decodeURIComponent(location.pathname.split('/').pop());
let loaded = false;
let shown = false;

btn.addEventListener('click', async () => {
  if (!loaded) {
    const res = await fetch(`/api/problems/${encodeURIComponent(problemId)}`);
    const data = await res.json();
    ans.textContent = data.answer || '答えデータなし';
    loaded = true;
  }
  shown = !shown;
  wrap.style.display = shown ? 'block' : 'none';
  btn.textContent = shown ? '答えを隠す' : '答えを表示';
});
</script>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"ja\">\n",
            "<head>\n",
            "  <meta charset=\"utf-8\" />\n",
            "  <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />\n",
            "  <title>{}</title>\n",
            "  <style>{}</style>\n",
            "</head>\n",
            "<body>\n{}\n</body>\n",
            "</html>"
        ),
        escape(title),
        PAGE_STYLE,
        body
    )
}

pub fn search_page() -> String {
    page("化学問題検索", SEARCH_BODY)
}

pub fn problem_page(problem: &Problem) -> String {
    let choices = if problem.choices.is_empty() {
        "<li>選択肢なし</li>".to_string()
    } else {
        problem
            .choices
            .iter()
            .map(|choice| format!("<li>{}</li>", escape(choice)))
            .collect()
    };

    let mut body = String::new();
    body.push_str("<a href=\"/\">← 検索へ戻る</a>\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape(&problem.title)));
    body.push_str(&format!("<p><strong>ID:</strong> {}</p>\n", escape(&problem.id)));
    body.push_str(&format!(
        "<p><strong>tags:</strong> {}</p>\n",
        escape(&problem.tags.join(", "))
    ));
    body.push_str(&format!(
        "<p><strong>source:</strong> {}</p>\n",
        escape(&problem.source)
    ));
    body.push_str(&format!(
        "<h2>問題文</h2>\n<pre>{}</pre>\n",
        escape(&problem.statement)
    ));
    body.push_str(&format!("<h2>選択肢</h2>\n<ol>\n{}\n</ol>\n", choices));
    body.push_str("<button id=\"toggleAnswer\">答えを表示</button>\n");
    body.push_str(
        "<div id=\"answerWrap\" style=\"display:none; margin-top: 0.8rem;\">\n  <h2>答え</h2>\n  <pre id=\"answerText\"></pre>\n</div>\n",
    );
    body.push_str(ANSWER_SCRIPT);

    page(&problem.title, &body)
}

pub fn not_found_page() -> String {
    page("404", "<h1>404</h1>\n<p>問題が見つかりません。</p>")
}

/// Minimal HTML escaping for text interpolated into pages.
fn escape(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Problem {
        Problem {
            id: "q1".to_string(),
            title: "気体の<状態>方程式".to_string(),
            statement: "V & T の関係を答えよ".to_string(),
            choices: vec!["1.2 L".to_string()],
            answer: Some("2.4 L".to_string()),
            tags: vec!["気体".to_string()],
            concepts: vec![],
            source: "dummy".to_string(),
        }
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("気体の状態方程式"), "気体の状態方程式");
    }

    #[test]
    fn problem_page_escapes_dynamic_fields() {
        let html = problem_page(&sample());
        assert!(html.contains("気体の&lt;状態&gt;方程式"));
        assert!(html.contains("V &amp; T"));
        assert!(!html.contains("気体の<状態>方程式"));
    }

    #[test]
    fn problem_page_without_choices_renders_placeholder() {
        let mut problem = sample();
        problem.choices.clear();
        assert!(problem_page(&problem).contains("選択肢なし"));
    }
}
