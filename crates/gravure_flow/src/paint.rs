//! Fragment painter.
//!
//! Replays the positions recorded by the last measurement into an SVG
//! fragment. Tokens that touch on the same line with the same vertical
//! offset and color merge into one outline request, so a shaping engine can
//! kern across token boundaries. Alignment, overflow truncation and
//! decoration rules are resolved here; the line breaker never sees them.

use compact_str::{format_compact, CompactString};

use gravure_plate::{
    decoration_line, element, image_element, num, path_element, shadow_filter, text_element,
    transform_group, BackgroundClipPaths, DecorationSpec, GlyphRun, GroupSpec, ImageGlyph,
};

use crate::font::{FontEngine, OutlineRequest};
use crate::layout::flow::FlowState;
use crate::layout::PaintOptions;
use crate::style::{TextAlign, TextOverflow, TextStyle};

pub(crate) struct PaintParams<'a> {
    pub left: f32,
    pub top: f32,
    pub container_width: f32,
    pub node_id: u64,
    pub options: &'a PaintOptions,
}

/// Glyph run accumulated across adjacent tokens.
struct MergeRun {
    text: String,
    left: f32,
    top: f32,
    line: usize,
    color: CompactString,
}

/// Decoration rule opened at the first rendered token of a line.
struct OpenDecoration {
    left: f32,
    top: f32,
    width: f32,
    ascender: f32,
    emitted: bool,
}

fn flush_run(
    run: &mut Option<MergeRun>,
    engine: &dyn FontEngine,
    style: &TextStyle,
    body: &mut String,
    clips: &mut BackgroundClipPaths,
) {
    let Some(run) = run.take() else { return };
    let d = engine.outline(
        &run.text,
        &OutlineRequest {
            left: run.left,
            top: run.top,
            font_size: style.font_size,
            letter_spacing: style.letter_spacing,
        },
    );
    if run.color != "transparent" && style.opacity != 0.0 {
        body.push_str(&path_element(&d, Some(&run.color)));
    }
    if style.background_clip_text {
        clips.push(path_element(&d, None));
    }
}

pub(crate) fn paint(
    state: &mut FlowState,
    params: &PaintParams<'_>,
    clips: &mut BackgroundClipPaths,
) -> String {
    if state.line_count() == 0 {
        return String::new();
    }
    let style = state.style.clone();
    let line_count = state.line_count();
    let last_line = line_count - 1;
    // A clamp that dropped content always truncates with an ellipsis.
    let overflow =
        if state.clamped { TextOverflow::Ellipsis } else { style.text_overflow };

    let mut last_of_line: Vec<Option<usize>> = vec![None; line_count];
    for (i, pos) in state.positions.iter().enumerate() {
        if let Some(pos) = pos {
            if !state.words[i].text.is_empty() {
                last_of_line[pos.line] = Some(i);
            }
        }
    }

    let mut decorations: Vec<Option<OpenDecoration>> = Vec::new();
    decorations.resize_with(line_count, || None);

    let mut body = String::new();
    let mut merge: Option<MergeRun> = None;
    // Line already truncated; its remaining tokens are dropped.
    let mut skipped: Option<usize> = None;

    for i in 0..state.positions.len() {
        let Some(pos) = state.positions[i] else {
            // Separators and dropped tokens end run adjacency.
            flush_run(&mut merge, state.engine.as_ref(), &style, &mut body, clips);
            continue;
        };
        if skipped == Some(pos.line) {
            continue;
        }
        let mut content = state.words[i].text.clone();
        if content.is_empty() {
            continue;
        }
        let line = pos.line;

        // Per-line alignment shift. Single-line flows are placed by the box
        // engine, so only multi-line flows shift here.
        let mut x = pos.x;
        let mut justified_line = false;
        if line_count > 1 {
            let remaining = params.container_width - state.line_widths[line];
            match style.text_align {
                TextAlign::Right | TextAlign::End => x += remaining,
                TextAlign::Center => x += remaining / 2.0,
                TextAlign::Justify if line < last_line => {
                    let segments = state.line_segments[line];
                    if segments > 1 {
                        x += remaining / (segments - 1) as f32 * pos.line_index as f32;
                    }
                    justified_line = true;
                }
                _ => {}
            }
        }

        let token_baseline = state.engine.baseline(&content);
        let glyph_top = pos.y + (state.line_baselines[line] - token_baseline);

        if style.text_decoration.is_some() && decorations[line].is_none() {
            decorations[line] = Some(OpenDecoration {
                left: x,
                top: pos.y,
                width: if justified_line {
                    params.container_width
                } else {
                    state.line_widths[line]
                },
                // anchored on the line baseline, not the opening token's
                ascender: state.line_baselines[line],
                emitted: false,
            });
        }

        let mut width = pos.width;
        let is_image = style.grapheme_images.contains_key(content.as_str());

        if overflow == TextOverflow::Ellipsis && !is_image {
            let line_overflows = state.line_widths[line] > params.container_width
                || (state.clamped && line == last_line);
            if line_overflows {
                let ellipsis_width = state.measure_width("…");
                let space_width = state.measure_width(" ");
                let clamp_tail =
                    state.clamped && line == last_line && last_of_line[line] == Some(i);
                if clamp_tail
                    || x + width + ellipsis_width + space_width > params.container_width
                {
                    // Binary scan for the longest grapheme prefix that still
                    // fits with the ellipsis appended. At least one grapheme
                    // is always kept.
                    let truncated: CompactString = {
                        let gs: Vec<&str> = crate::text::graphemes(&content).collect();
                        let mut lo = 1usize;
                        let mut hi = gs.len();
                        while lo < hi {
                            let mid = (lo + hi + 1) / 2;
                            let mut candidate = gs[..mid].concat();
                            candidate.push('…');
                            if x + state.measure_width(&candidate) > params.container_width {
                                hi = mid - 1;
                            } else {
                                lo = mid;
                            }
                        }
                        format_compact!("{}…", gs[..lo].concat())
                    };
                    width = state.measure_width(&truncated);
                    state.words[i].text = truncated.clone();
                    content = truncated;
                    skipped = Some(line);
                    if let Some(deco) = decorations[line].as_mut() {
                        deco.width = x + width - deco.left;
                    }
                }
            }
        }

        let run_color = state.words[i].color.clone();
        let fill: &str = run_color.as_deref().unwrap_or(&style.color);
        let left_abs = params.left + x;
        let top_abs = params.top + glyph_top;

        if is_image {
            flush_run(&mut merge, state.engine.as_ref(), &style, &mut body, clips);
            if let Some(href) = style.grapheme_images.get(content.as_str()) {
                body.push_str(&image_element(&ImageGlyph {
                    href,
                    left: left_abs,
                    top: top_abs,
                    size: style.font_size,
                }));
            }
        } else if params.options.embed_font {
            match merge.as_mut() {
                Some(run) if run.line == line && run.top == top_abs && run.color == fill => {
                    run.text.push_str(&content);
                }
                _ => {
                    flush_run(&mut merge, state.engine.as_ref(), &style, &mut body, clips);
                    merge = Some(MergeRun {
                        text: content.as_str().to_owned(),
                        left: left_abs,
                        top: top_abs,
                        line,
                        color: fill.into(),
                    });
                }
            }
        } else {
            let (fragment, clip) = text_element(
                &GlyphRun {
                    content: &content,
                    left: left_abs,
                    baseline: params.top + pos.y + state.line_baselines[line],
                    font_size: style.font_size,
                    letter_spacing: style.letter_spacing,
                    fill,
                },
                style.background_clip_text,
            );
            if fill != "transparent" && style.opacity != 0.0 {
                body.push_str(&fragment);
            }
            if let Some(clip) = clip {
                clips.push(clip);
            }
        }

        if let Some(cfg) = style.text_decoration.as_ref() {
            if let Some(deco) = decorations[line].as_mut() {
                let closes = skipped == Some(line) || last_of_line[line] == Some(i);
                if closes && !deco.emitted {
                    deco.emitted = true;
                    flush_run(&mut merge, state.engine.as_ref(), &style, &mut body, clips);
                    body.push_str(&decoration_line(&DecorationSpec {
                        left: params.left + deco.left,
                        top: params.top + deco.top,
                        width: deco.width,
                        ascender: deco.ascender,
                        font_size: style.font_size,
                        kind: cfg.kind,
                        stroke: cfg.stroke,
                        color: cfg.color.as_deref().unwrap_or(&style.color),
                    }));
                }
            }
        }
    }
    flush_run(&mut merge, state.engine.as_ref(), &style, &mut body, clips);

    let mut out = String::new();
    if !body.is_empty() {
        let filter_id = format_compact!("gs-{}", params.node_id);
        let shadowed = !style.text_shadow.is_empty();
        if shadowed {
            out.push_str(&shadow_filter(&filter_id, &style.text_shadow));
        }
        out.push_str(&transform_group(
            &GroupSpec {
                transform: style.transform.as_deref(),
                opacity: style.opacity,
                clip_path_id: style.clip_path_id.as_deref(),
                mask_id: style.mask_id.as_deref(),
                filter_id: shadowed.then(|| filter_id.as_str()),
            },
            &body,
        ));
    }
    if params.options.debug {
        out.push_str(&debug_overlay(state, params));
    }
    out
}

/// Token boxes and line baselines, drawn at the laid-out positions.
fn debug_overlay(state: &FlowState, params: &PaintParams<'_>) -> String {
    let mut out = String::new();
    let mut line_tops: Vec<Option<f32>> = vec![None; state.line_count()];
    for (i, pos) in state.positions.iter().enumerate() {
        let Some(pos) = pos else { continue };
        let text = &state.words[i].text;
        if text.is_empty() {
            continue;
        }
        if line_tops[pos.line].is_none() {
            line_tops[pos.line] = Some(pos.y);
        }
        out.push_str(&element(
            "rect",
            &[
                ("x", num(params.left + pos.x)),
                ("y", num(params.top + pos.y)),
                ("width", num(pos.width)),
                ("height", num(state.engine.line_height(text))),
                ("fill", "none".into()),
                ("stroke", "#575eff".into()),
                ("stroke-width", num(1.0)),
            ],
            None,
        ));
    }
    for (line, top) in line_tops.iter().enumerate() {
        let Some(top) = top else { continue };
        let y = params.top + top + state.line_baselines[line];
        out.push_str(&element(
            "line",
            &[
                ("x1", num(params.left)),
                ("y1", num(y)),
                ("x2", num(params.left + params.container_width)),
                ("y2", num(y)),
                ("stroke", "#14c000".into()),
                ("stroke-width", num(1.0)),
            ],
            None,
        ));
    }
    out
}
