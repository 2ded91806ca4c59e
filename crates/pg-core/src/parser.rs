//! Parser for the playground markup → `Document`.
//!
//! Built on `winnow` 0.7. Handles comments, `preset` blocks that extend the
//! catalog, an optional `root { ... }` block styling the page container,
//! and nested element declarations:
//!
//! ```text
//! preset title { font: "Inter" 700 48px; letter: -0.02em; line: 1.1; color: #111827 }
//! container @hero {
//!   width: 960px
//!   text @headline "Ship faster" { preset: title }
//! }
//! ```

use crate::id::ElementId;
use crate::model::*;
use crate::preset::{PresetCatalog, StylePreset};
use crate::style::{BoxSide, Color, CssValue, Length, StyleProperty, StyleState, TextAlign};
use petgraph::graph::NodeIndex;
use thiserror::Error;
use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Why a document failed to load. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown element kind `{name}`")]
    UnknownRole { line: usize, name: String },

    #[error("line {line}: unknown property `{name}`")]
    UnknownProperty { line: usize, name: String },

    #[error("line {line}: invalid value `{value}` for `{property}`")]
    InvalidValue {
        line: usize,
        property: String,
        value: String,
    },

    #[error("line {line}: unknown preset `{name}`")]
    UnknownPreset { line: usize, name: String },

    #[error("duplicate element id `{0}`")]
    DuplicateId(String),
}

/// Parse a playground document.
#[must_use = "parsing result should be used"]
pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    let mut presets = Vec::new();
    let mut nodes = Vec::new();
    let mut rest = input;

    skip_ws_and_comments(&mut rest);

    while !rest.is_empty() {
        let word = peek_identifier(rest);
        if word == "preset" {
            let parsed = parse_preset_block.parse_next(&mut rest);
            presets.push(parsed.map_err(|e| syntax(input, rest, format!("preset block: {e}")))?);
        } else if word == "root" || Role::parse(word).is_some() {
            let parsed = parse_node.parse_next(&mut rest);
            nodes.push(parsed.map_err(|e| syntax(input, rest, format!("element: {e}")))?);
        } else if word.is_empty() {
            return Err(syntax(input, rest, "expected a preset or element".into()));
        } else {
            return Err(ParseError::UnknownRole {
                line: line_at(input, rest.len()),
                name: word.to_string(),
            });
        }
        skip_ws_and_comments(&mut rest);
    }

    let mut catalog = PresetCatalog::builtin();
    for block in presets {
        let preset = build_preset(input, &catalog, block)?;
        catalog.insert(preset);
    }

    let mut doc = Document::with_catalog(catalog);
    let root = doc.root;
    for node in nodes {
        insert_node_recursive(input, &mut doc, root, node, true)?;
    }
    log::debug!(
        "parsed document: {} elements, {} presets",
        doc.graph.node_count(),
        doc.catalog.len()
    );
    Ok(doc)
}

fn syntax(input: &str, rest: &str, message: String) -> ParseError {
    ParseError::Syntax {
        line: line_at(input, rest.len()),
        message,
    }
}

/// 1-based line of the position `remaining` bytes before the end of `input`.
fn line_at(input: &str, remaining: usize) -> usize {
    let consumed = input.len().saturating_sub(remaining);
    input
        .get(..consumed)
        .map_or(1, |s| s.matches('\n').count() + 1)
}

// ─── Intermediate representation ────────────────────────────────────────

#[derive(Debug)]
struct RawProp {
    name: String,
    value: String,
    /// Bytes remaining after this property started, for error lines.
    pos: usize,
}

#[derive(Debug)]
enum NodeKind {
    Root,
    Element(Role),
}

#[derive(Debug)]
struct ParsedNode {
    kind: NodeKind,
    id: Option<ElementId>,
    content: Option<String>,
    props: Vec<RawProp>,
    children: Vec<ParsedNode>,
    pos: usize,
}

#[derive(Debug)]
struct ParsedPreset {
    name: String,
    props: Vec<RawProp>,
}

fn insert_node_recursive(
    input: &str,
    doc: &mut Document,
    parent: NodeIndex,
    parsed: ParsedNode,
    top_level: bool,
) -> Result<(), ParseError> {
    let role = match parsed.kind {
        NodeKind::Root if top_level => {
            let root = doc.root;
            let mut style = std::mem::take(&mut doc.graph[root].style);
            apply_properties(input, &mut style, &parsed.props, &doc.catalog)?;
            doc.graph[root].style = style;
            for child in parsed.children {
                insert_node_recursive(input, doc, root, child, false)?;
            }
            return Ok(());
        }
        NodeKind::Root => {
            return Err(ParseError::Syntax {
                line: line_at(input, parsed.pos),
                message: "`root` is only allowed at top level".into(),
            });
        }
        NodeKind::Element(role) => role,
    };

    let id = parsed
        .id
        .unwrap_or_else(|| ElementId::with_prefix(role.name()));
    if doc.index_of(id).is_some() {
        return Err(ParseError::DuplicateId(id.as_str().to_string()));
    }
    if parsed.content.is_some() && !role.has_text() {
        return Err(ParseError::Syntax {
            line: line_at(input, parsed.pos),
            message: format!("`{}` elements carry no text", role.name()),
        });
    }

    let mut node = ElementNode::new(id, role);
    node.content = parsed.content.or_else(|| role.has_text().then(String::new));
    apply_properties(input, &mut node.style, &parsed.props, &doc.catalog)?;

    let idx = doc.add_element(parent, node);
    for child in parsed.children {
        insert_node_recursive(input, doc, idx, child, false)?;
    }
    Ok(())
}

fn apply_properties(
    input: &str,
    style: &mut StyleState,
    props: &[RawProp],
    catalog: &PresetCatalog,
) -> Result<(), ParseError> {
    for prop in props {
        let line = line_at(input, prop.pos);
        let invalid = || ParseError::InvalidValue {
            line,
            property: prop.name.clone(),
            value: prop.value.clone(),
        };

        if prop.name == "preset" {
            let name = prop.value.trim();
            if catalog.get(name).is_none() {
                return Err(ParseError::UnknownPreset {
                    line,
                    name: name.to_string(),
                });
            }
            style.preset = Some(name.to_string());
            continue;
        }

        for (p, v) in expand_property(&prop.name, &prop.value, line)?.ok_or_else(invalid)? {
            style.set(p, v);
        }
    }
    Ok(())
}

/// Expand one markup property (shorthands included) into typed overrides.
/// `Ok(None)` means the property is known but the value is not.
fn expand_property(
    name: &str,
    value: &str,
    line: usize,
) -> Result<Option<Vec<(StyleProperty, CssValue)>>, ParseError> {
    let single = |p: StyleProperty| Ok(parse_value(p, value).map(|v| vec![(p, v)]));
    match name {
        "font" => Ok(parse_font_shorthand(value)),
        "margin" => Ok(parse_box_shorthand(value, StyleProperty::margin)),
        "padding" => Ok(parse_box_shorthand(value, StyleProperty::padding)),
        "letter" => single(StyleProperty::LetterSpacing),
        "line" => single(StyleProperty::LineHeight),
        "family" => single(StyleProperty::FontFamily),
        "size" => single(StyleProperty::FontSize),
        "weight" => single(StyleProperty::FontWeight),
        _ => match StyleProperty::parse(name) {
            Some(p) => single(p),
            None => Err(ParseError::UnknownProperty {
                line,
                name: name.to_string(),
            }),
        },
    }
}

fn build_preset(
    input: &str,
    catalog: &PresetCatalog,
    block: ParsedPreset,
) -> Result<StylePreset, ParseError> {
    let mut preset = catalog.get(&block.name).cloned().unwrap_or_else(|| StylePreset {
        name: block.name.clone(),
        font_family: "Inter".into(),
        font_size: Length::Px(16.0),
        font_weight: 400,
        letter_spacing: Length::ZERO,
        line_height: CssValue::Number(1.5),
        color: Color::rgba(55.0 / 255.0, 65.0 / 255.0, 81.0 / 255.0, 1.0),
    });

    for prop in &block.props {
        let line = line_at(input, prop.pos);
        let entries = expand_property(&prop.name, &prop.value, line)?.ok_or_else(|| {
            ParseError::InvalidValue {
                line,
                property: prop.name.clone(),
                value: prop.value.clone(),
            }
        })?;
        for (p, v) in entries {
            match (p, v) {
                (StyleProperty::FontFamily, CssValue::Family(f)) => preset.font_family = f,
                (StyleProperty::FontSize, CssValue::Length(l)) => preset.font_size = l,
                (StyleProperty::FontWeight, CssValue::Weight(w)) => preset.font_weight = w,
                (StyleProperty::LetterSpacing, CssValue::Length(l)) => preset.letter_spacing = l,
                (StyleProperty::LineHeight, v) => preset.line_height = v,
                (StyleProperty::Color, CssValue::Color(c)) => preset.color = c,
                (p, _) => {
                    return Err(ParseError::Syntax {
                        line,
                        message: format!("presets cannot set `{}`", p.css_name()),
                    });
                }
            }
        }
    }
    Ok(preset)
}

// ─── Values ──────────────────────────────────────────────────────────────

/// Parse CSS text for one property into a typed value.
pub fn parse_value(prop: StyleProperty, text: &str) -> Option<CssValue> {
    let text = text.trim();
    match prop {
        StyleProperty::FontFamily => {
            let family = unquote(text.split(',').next().unwrap_or_default().trim());
            (!family.is_empty()).then(|| CssValue::Family(family))
        }
        StyleProperty::FontWeight => match text {
            "bold" => Some(CssValue::Weight(700)),
            "normal" => Some(CssValue::Weight(400)),
            _ => text
                .parse::<u16>()
                .ok()
                .filter(|w| (1..=1000).contains(w))
                .map(CssValue::Weight),
        },
        StyleProperty::Color => text
            .starts_with('#')
            .then(|| Color::from_hex(text))
            .flatten()
            .map(CssValue::Color),
        StyleProperty::LineHeight => match text.parse::<f32>() {
            Ok(n) if n >= 0.0 => Some(CssValue::Number(n)),
            Ok(_) => None,
            Err(_) => parse_length_str(text).map(CssValue::Length),
        },
        StyleProperty::TextAlign => TextAlign::parse(text).map(|a| CssValue::keyword(a.name())),
        StyleProperty::Display => match text {
            "block" | "flex" => Some(CssValue::keyword(text)),
            _ => None,
        },
        StyleProperty::FlexDirection => match text {
            "row" | "column" => Some(CssValue::keyword(text)),
            _ => None,
        },
        _ => parse_length_str(text).map(CssValue::Length),
    }
}

/// Parse a complete length (`24px`, `1.5rem`, `-0.02em`, `50%`, `auto`, `0`).
pub fn parse_length_str(text: &str) -> Option<Length> {
    let mut input = text.trim();
    let length = parse_length.parse_next(&mut input).ok()?;
    input.is_empty().then_some(length)
}

fn unquote(s: &str) -> String {
    s.trim_matches(|c| c == '"' || c == '\'').to_string()
}

/// Split a raw value into tokens, keeping quoted strings whole.
fn value_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        if rest.starts_with('"') {
            match parse_quoted_string.parse_next(&mut rest) {
                Ok(s) => tokens.push(format!("\"{s}\"")),
                Err(_) => {
                    tokens.push(rest.to_string());
                    break;
                }
            }
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            tokens.push(rest[..end].to_string());
            rest = &rest[end..];
        }
        rest = rest.trim_start();
    }
    tokens
}

/// `font: ["Family"] [weight] size`
fn parse_font_shorthand(text: &str) -> Option<Vec<(StyleProperty, CssValue)>> {
    let tokens = value_tokens(text);
    let mut out = Vec::new();
    let mut rest: &[String] = &tokens;

    if let Some(first) = rest.first()
        && first.starts_with('"')
    {
        out.push((StyleProperty::FontFamily, CssValue::Family(unquote(first))));
        rest = &rest[1..];
    }

    match rest {
        [size] => {
            out.push((StyleProperty::FontSize, CssValue::Length(parse_length_str(size)?)));
        }
        [weight, size] => {
            out.push((
                StyleProperty::FontWeight,
                parse_value(StyleProperty::FontWeight, weight)?,
            ));
            out.push((StyleProperty::FontSize, CssValue::Length(parse_length_str(size)?)));
        }
        [] if !out.is_empty() => {}
        _ => return None,
    }
    Some(out)
}

/// CSS box shorthand: 1 to 4 lengths, clockwise from the top.
fn parse_box_shorthand(
    text: &str,
    property: fn(BoxSide) -> StyleProperty,
) -> Option<Vec<(StyleProperty, CssValue)>> {
    let lengths = value_tokens(text)
        .iter()
        .map(|t| parse_length_str(t))
        .collect::<Option<Vec<Length>>>()?;
    let [top, right, bottom, left] = match lengths.as_slice() {
        [a] => [*a, *a, *a, *a],
        [v, h] => [*v, *h, *v, *h],
        [t, h, b] => [*t, *h, *b, *h],
        [t, r, b, l] => [*t, *r, *b, *l],
        _ => return None,
    };
    Some(
        BoxSide::ALL
            .into_iter()
            .zip([top, right, bottom, left])
            .map(|(side, l)| (property(side), CssValue::Length(l)))
            .collect(),
    )
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_ws_and_comments(input: &mut &str) {
    loop {
        let before = *input;
        *input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
        if input.starts_with('#') {
            // Comment: skip to end of line
            if let Some(pos) = input.find('\n') {
                *input = &input[pos + 1..];
            } else {
                *input = "";
            }
            continue;
        }
        if *input == before {
            break;
        }
    }
}

/// Consume optional spaces and tabs (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::space0;
    let _: Result<&str, ErrMode<ContextError>> = space0.parse_next(input);
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn peek_identifier(input: &str) -> &str {
    let end = input.find(|c| !is_ident_char(c)).unwrap_or(input.len());
    &input[..end]
}

fn parse_identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_ident_char).parse_next(input)
}

fn parse_element_id(input: &mut &str) -> ModalResult<ElementId> {
    preceded('@', parse_identifier)
        .map(ElementId::intern)
        .parse_next(input)
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

fn parse_length(input: &mut &str) -> ModalResult<Length> {
    if input.starts_with("auto") {
        let _ = "auto".parse_next(input)?;
        return Ok(Length::Auto);
    }
    let n = parse_number.parse_next(input)?;
    let unit = opt(alt(("px", "rem", "em", "%"))).parse_next(input)?;
    Ok(match unit {
        Some("rem") => Length::Rem(n),
        Some("em") => Length::Em(n),
        Some("%") => Length::Percent(n),
        _ => Length::Px(n),
    })
}

/// Double-quoted string; `\"` and `\\` escape.
fn parse_quoted_string(input: &mut &str) -> ModalResult<String> {
    let _ = '"'.parse_next(input)?;
    let s = *input;
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                *input = &s[i + 1..];
                return Ok(out);
            }
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(ErrMode::Cut(ContextError::new()))
}

/// Raw property value: everything up to an unquoted `;`, newline, or `}`.
fn take_value(input: &mut &str) -> String {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut end = input.len();
    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' | '\n' | '}' if !in_quotes => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    let value = input[..end].trim().to_string();
    *input = &input[end..];
    value
}

// ─── Block parsers ──────────────────────────────────────────────────────

fn parse_properties(input: &mut &str, props: &mut Vec<RawProp>) -> ModalResult<()> {
    let pos = input.len();
    let name = parse_identifier.parse_next(input)?;
    skip_space(input);
    let _ = ':'.parse_next(input)?;
    skip_space(input);
    props.push(RawProp {
        name: name.to_string(),
        value: take_value(input),
        pos,
    });
    Ok(())
}

fn parse_preset_block(input: &mut &str) -> ModalResult<ParsedPreset> {
    let _ = "preset".parse_next(input)?;
    skip_space(input);
    let name = parse_identifier.parse_next(input)?.to_string();
    skip_space(input);
    let _ = '{'.parse_next(input)?;

    let mut props = Vec::new();
    skip_ws_and_comments(input);
    while !input.starts_with('}') {
        if input.is_empty() {
            return Err(ErrMode::Cut(ContextError::new()));
        }
        parse_properties(input, &mut props)?;
        skip_ws_and_comments(input);
    }
    let _ = '}'.parse_next(input)?;
    Ok(ParsedPreset { name, props })
}

fn parse_node(input: &mut &str) -> ModalResult<ParsedNode> {
    let pos = input.len();
    let keyword = parse_identifier.parse_next(input)?;
    let kind = match keyword {
        "root" => NodeKind::Root,
        other => NodeKind::Element(
            Role::parse(other).ok_or_else(|| ErrMode::Cut(ContextError::new()))?,
        ),
    };
    skip_space(input);

    let id = if input.starts_with('@') {
        Some(parse_element_id.parse_next(input)?)
    } else {
        None
    };
    skip_space(input);

    let content = if input.starts_with('"') {
        Some(parse_quoted_string.parse_next(input)?)
    } else {
        None
    };
    skip_space(input);

    let mut props = Vec::new();
    let mut children = Vec::new();

    if input.starts_with('{') {
        let _ = '{'.parse_next(input)?;
        skip_ws_and_comments(input);
        while !input.starts_with('}') {
            if input.is_empty() {
                return Err(ErrMode::Cut(ContextError::new()));
            }
            let checkpoint = *input;
            let word = parse_identifier.parse_next(input)?;
            skip_space(input);
            let is_property = input.starts_with(':');
            *input = checkpoint;

            if is_property {
                parse_properties(input, &mut props)?;
            } else if Role::parse(word).is_some() {
                children.push(parse_node.parse_next(input)?);
            } else {
                return Err(ErrMode::Cut(ContextError::new()));
            }
            skip_ws_and_comments(input);
        }
        let _ = '}'.parse_next(input)?;
    }

    Ok(ParsedNode {
        kind,
        id,
        content,
        props,
        children,
        pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_minimal_document() {
        let doc = parse_document("text @parse_min \"Hello\"").unwrap();
        let node = doc.get(ElementId::intern("parse_min")).unwrap();
        assert_eq!(node.role, Role::Text);
        assert_eq!(node.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn parse_nested_with_properties() {
        let input = r#"
# marketing hero
container @parse_hero {
  width: 960px
  padding: 32px 16px
  text @parse_headline "Ship faster" { preset: title; margin-left: 2rem }
  button @parse_cta "Start free" { margin: 16px 0 0 0 }
}
"#;
        let doc = parse_document(input).unwrap();
        let hero = doc.get(ElementId::intern("parse_hero")).unwrap();
        assert_eq!(hero.style.overrides.get(&StyleProperty::Width), Some(&CssValue::px(960.0)));
        assert_eq!(hero.style.overrides.get(&StyleProperty::PaddingLeft), Some(&CssValue::px(16.0)));
        assert_eq!(hero.style.overrides.get(&StyleProperty::PaddingTop), Some(&CssValue::px(32.0)));

        let headline = doc.get(ElementId::intern("parse_headline")).unwrap();
        assert_eq!(headline.style.preset.as_deref(), Some("title"));
        assert_eq!(
            headline.style.overrides.get(&StyleProperty::MarginLeft),
            Some(&CssValue::Length(Length::Rem(2.0)))
        );
        assert_eq!(
            doc.parent_id(ElementId::intern("parse_cta")),
            Some(ElementId::intern("parse_hero"))
        );
    }

    #[test]
    fn parse_preset_block_extends_catalog() {
        let input = r#"
preset promo { font: "Söhne" 600 28px; letter: 0.01em; line: 1.25; color: #0F766E }
text @parse_promo "Limited offer" { preset: promo }
"#;
        let doc = parse_document(input).unwrap();
        let promo = doc.catalog.get("promo").unwrap();
        assert_eq!(promo.font_family, "Söhne");
        assert_eq!(promo.font_weight, 600);
        assert_eq!(promo.font_size, Length::Px(28.0));
        assert_eq!(promo.line_height, CssValue::Number(1.25));
        assert_eq!(doc.catalog.names().last(), Some(&"promo"));
    }

    #[test]
    fn parse_root_block_styles_page() {
        let doc = parse_document("root { display: flex; flex-direction: column }").unwrap();
        let root = &doc.graph[doc.root];
        assert_eq!(root.style.overrides.get(&StyleProperty::Display), Some(&CssValue::keyword("flex")));
    }

    #[test]
    fn parse_escaped_text() {
        let doc = parse_document(r#"text @parse_quote "Say \"hi\"""#).unwrap();
        let node = doc.get(ElementId::intern("parse_quote")).unwrap();
        assert_eq!(node.content.as_deref(), Some("Say \"hi\""));
    }

    #[test]
    fn parse_anonymous_ids() {
        let doc = parse_document("card { text \"A\"\n text \"B\" }").unwrap();
        assert_eq!(doc.graph.node_count(), 4);
    }

    #[test]
    fn parse_values() {
        assert_eq!(
            parse_value(StyleProperty::FontSize, "1.5rem"),
            Some(CssValue::Length(Length::Rem(1.5)))
        );
        assert_eq!(parse_value(StyleProperty::MarginLeft, "auto"), Some(CssValue::auto()));
        assert_eq!(parse_value(StyleProperty::LineHeight, "1.1"), Some(CssValue::Number(1.1)));
        assert_eq!(parse_value(StyleProperty::FontWeight, "bold"), Some(CssValue::Weight(700)));
        assert_eq!(parse_value(StyleProperty::FontSize, "big"), None);
        assert_eq!(parse_value(StyleProperty::Color, "red"), None);
    }

    #[test]
    fn errors_carry_lines() {
        assert_eq!(
            parse_document("text @e1 \"a\"\nwidget @e2 {}").unwrap_err(),
            ParseError::UnknownRole {
                line: 2,
                name: "widget".into()
            }
        );
        assert_eq!(
            parse_document("text @e3 \"a\" {\n  float: left\n}").unwrap_err(),
            ParseError::UnknownProperty {
                line: 2,
                name: "float".into()
            }
        );
        assert_eq!(
            parse_document("text @e4 \"a\" { preset: hero }").unwrap_err(),
            ParseError::UnknownPreset {
                line: 1,
                name: "hero".into()
            }
        );
        assert!(matches!(
            parse_document("text @e5 \"a\" { font-size: huge }").unwrap_err(),
            ParseError::InvalidValue { .. }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert_eq!(
            parse_document("text @dup \"a\"\ntext @dup \"b\"").unwrap_err(),
            ParseError::DuplicateId("dup".into())
        );
    }

    #[test]
    fn unterminated_block_is_a_syntax_error() {
        assert!(matches!(
            parse_document("container @open {\n  width: 10px\n").unwrap_err(),
            ParseError::Syntax { .. }
        ));
    }
}
