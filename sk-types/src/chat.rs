use derive_more::Display;
use lazy_regex::regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatReply {
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.reply.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Span {
    Text(String),
    Bold(String),
    #[display("\n")]
    LineBreak,
}

/// Newlines become line breaks and `**text**` becomes bold. Bold spans may
/// cross lines; the break is kept between the bold pieces.
pub fn format_message(text: &str) -> Vec<Span> {
    let bold = regex!(r"(?s)\*\*(.*?)\*\*");
    let mut spans = vec![];
    let mut last = 0;
    for caps in bold.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_lines(&mut spans, &text[last..whole.start()], Span::Text);
        push_lines(&mut spans, inner.as_str(), Span::Bold);
        last = whole.end();
    }
    push_lines(&mut spans, &text[last..], Span::Text);
    spans
}

fn push_lines(spans: &mut Vec<Span>, text: &str, span: fn(String) -> Span) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span::LineBreak);
        }
        if !line.is_empty() {
            spans.push(span(line.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bold_and_breaks() {
        assert_eq!(
            format_message("Halo **kak**!\nCoba **serum** dan **toner**"),
            vec![
                Span::Text("Halo ".to_string()),
                Span::Bold("kak".to_string()),
                Span::Text("!".to_string()),
                Span::LineBreak,
                Span::Text("Coba ".to_string()),
                Span::Bold("serum".to_string()),
                Span::Text(" dan ".to_string()),
                Span::Bold("toner".to_string()),
            ]
        );
    }

    #[test]
    fn bold_crosses_line_breaks() {
        assert_eq!(
            format_message("**Tips\nkulit** ya"),
            vec![
                Span::Bold("Tips".to_string()),
                Span::LineBreak,
                Span::Bold("kulit".to_string()),
                Span::Text(" ya".to_string()),
            ]
        );
        assert!(format_message("").is_empty());
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(
            format_message("**tidak ditutup\nya"),
            vec![
                Span::Text("**tidak ditutup".to_string()),
                Span::LineBreak,
                Span::Text("ya".to_string()),
            ]
        );
    }

    #[test]
    fn empty_reply_falls_back() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply":""}"#).expect("valid reply");
        assert_eq!(reply.text_or("default"), "default");
        let reply: ChatReply = serde_json::from_str("{}").expect("valid reply");
        assert_eq!(reply.text_or("default"), "default");
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply":"Hai","session_id":"x"}"#).expect("valid reply");
        assert_eq!(reply.text_or("default"), "Hai");
        let reply: ChatReply = serde_json::from_str(r#"{"reply":" "}"#).expect("valid reply");
        assert_eq!(reply.text_or("default"), " ");
    }
}
