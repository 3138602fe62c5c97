use regex::Regex;

use super::common::{
    balanced_parens, identifier_at, line_of, paren_list_then_semicolon, skip_whitespace, Span,
};
use super::{ModuleDef, ParseResult};

const END_KEYWORD: &str = "endmodule";

/// Extracts module definitions and `` `include `` directives from Verilog text.
///
/// Comment and string context is not tracked: a header or include inside a
/// comment is reported like any other.
#[derive(Debug, Clone)]
pub struct VerilogScanner {
    header: Regex,
    include: Regex,
}

impl VerilogScanner {
    pub fn new() -> Self {
        Self {
            header: Regex::new(r"\bmodule\s+[A-Za-z_]").expect("static regex"),
            include: Regex::new(r#"`include "(.*?)""#).expect("static regex"),
        }
    }

    pub fn parse_source(&self, text: &str) -> ParseResult {
        ParseResult {
            modules: self.extract_modules(text),
            includes: self.extract_includes(text),
        }
    }

    pub fn extract_modules(&self, text: &str) -> Vec<ModuleDef> {
        let mut modules = Vec::new();
        let mut pos = 0usize;

        while let Some(found) = self.header.find_at(text, pos) {
            // the match ends one byte into the identifier
            let name_start = found.end() - 1;
            match self.match_definition(text, name_start) {
                Some((name, body, resume)) => {
                    modules.push(ModuleDef {
                        name: name.slice(text).to_string(),
                        body: body.slice(text).to_string(),
                        line: line_of(text, found.start()),
                    });
                    pos = resume;
                }
                None => pos = name_start,
            }
        }

        modules
    }

    /// Header tail and body for the identifier starting at `name_start`.
    ///
    /// Returns the name span, the body span and the offset past `endmodule`.
    fn match_definition(&self, text: &str, name_start: usize) -> Option<(Span, Span, usize)> {
        let name = identifier_at(text, name_start)?;
        let mut after_name = skip_whitespace(text, name.end);

        // `#( ... )` parameter port list
        if text.as_bytes().get(after_name) == Some(&b'#') {
            let open = skip_whitespace(text, after_name + 1);
            if text.as_bytes().get(open) != Some(&b'(') {
                return None;
            }
            after_name = skip_whitespace(text, balanced_parens(text, open)?);
        }

        let header_end = match text.as_bytes().get(after_name)? {
            b'(' => paren_list_then_semicolon(text, after_name, Some(END_KEYWORD))?,
            b';' => after_name + 1,
            _ => return None,
        };

        let body_end = header_end + text[header_end..].find(END_KEYWORD)?;
        Some((
            name,
            Span::new(header_end, body_end),
            body_end + END_KEYWORD.len(),
        ))
    }

    /// Quoted names of every include directive, in order of appearance.
    pub fn extract_includes(&self, text: &str) -> Vec<String> {
        self.include
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for VerilogScanner {
    fn default() -> Self {
        Self::new()
    }
}
