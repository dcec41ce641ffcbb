//! PPTX reader.
//!
//! Walks a `.pptx` archive the same way PowerPoint resolves it: slide order
//! from `presentation.xml`, each slide's layout and images through its
//! relationship part. Produces a [`DeckSummary`] describing every text frame
//! and picture, which is what `deckgen inspect` prints.

use deckgen_core::{Error, Rect, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const CORE_PROPERTIES: &str = "docProps/core.xml";

/// Everything the reader recovered from a package.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    /// `dc:title` from the core properties, if any.
    pub title: Option<String>,
    pub width: i64,
    pub height: i64,
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// One slide, in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct SlideSummary {
    /// 1-based position in the deck.
    pub number: usize,
    /// Name of the slide's layout, e.g. "Title and Content".
    pub layout: Option<String>,
    pub text_frames: Vec<TextFrameSummary>,
    pub pictures: Vec<PictureSummary>,
}

impl SlideSummary {
    fn is_title_frame(frame: &TextFrameSummary) -> bool {
        match frame.placeholder.as_deref() {
            Some("title") | Some("ctrTitle") => true,
            Some(_) => false,
            None => frame.name.starts_with("Title"),
        }
    }

    /// Text of the first title frame.
    pub fn title(&self) -> Option<String> {
        self.text_frames
            .iter()
            .find(|f| Self::is_title_frame(f))
            .map(|f| f.paragraphs.join(" "))
    }

    /// Paragraphs of every non-title frame, in document order.
    pub fn body(&self) -> Vec<&str> {
        self.text_frames
            .iter()
            .filter(|f| !Self::is_title_frame(f))
            .flat_map(|f| f.paragraphs.iter().map(String::as_str))
            .collect()
    }
}

/// A text box or filled placeholder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextFrameSummary {
    pub name: String,
    /// Placeholder type (`title`, `ctrTitle`, `subTitle`, `body`, ...).
    pub placeholder: Option<String>,
    /// Explicit position; `None` when inherited from the layout.
    pub frame: Option<Rect>,
    /// Non-empty paragraphs.
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PictureSummary {
    pub name: String,
    pub description: String,
    pub frame: Option<Rect>,
    /// Archive path of the embedded image, e.g. `ppt/media/image1.png`.
    pub target: Option<String>,
}

/// Reader for `.pptx` packages.
pub struct DeckReader;

impl DeckReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a package from `reader`.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = read_file_from_archive(&mut archive, PRESENTATION_PART)?;
        let (width, height, slide_rel_ids) = parse_presentation(&presentation)?;

        let rels = parse_relationships(&read_file_from_archive(
            &mut archive,
            PRESENTATION_RELS,
        )?)?;
        let slide_paths = slide_order(&rels, &slide_rel_ids);

        let title = match read_file_from_archive(&mut archive, CORE_PROPERTIES) {
            Ok(xml) => parse_core_title(&xml)?,
            Err(e) => {
                log::debug!("No core properties: {}", e);
                None
            }
        };

        let mut slides = Vec::with_capacity(slide_paths.len());
        for (idx, path) in slide_paths.iter().enumerate() {
            slides.push(self.read_slide(&mut archive, path, idx + 1)?);
        }

        Ok(DeckSummary {
            title,
            width,
            height,
            slides,
        })
    }

    fn read_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        number: usize,
    ) -> Result<SlideSummary> {
        let content = read_file_from_archive(archive, slide_path)?;
        let rels = match read_file_from_archive(archive, &rels_path_for(slide_path)) {
            Ok(xml) => parse_relationships(&xml)?,
            Err(_) => Vec::new(),
        };
        let base = parent_dir(slide_path);

        let layout = match rels.iter().find(|r| r.rel_type.ends_with("/slideLayout")) {
            Some(rel) => {
                let layout_path = resolve_target(base, &rel.target);
                let xml = read_file_from_archive(archive, &layout_path)?;
                parse_layout_name(&xml)?
            }
            None => None,
        };

        let (text_frames, mut pictures) = extract_shapes(&content)?;
        for picture in &mut pictures {
            if let Some(embed) = picture.target.take() {
                picture.target = rels
                    .iter()
                    .find(|r| r.id == embed)
                    .map(|r| resolve_target(base, &r.target));
            }
        }

        Ok(SlideSummary {
            number,
            layout,
            text_frames,
            pictures,
        })
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn attr_i64(e: &BytesStart<'_>, key: &[u8]) -> i64 {
    attr_value(e, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                rels.push(Relationship {
                    id: attr_value(e, b"Id").unwrap_or_default(),
                    rel_type: attr_value(e, b"Type").unwrap_or_default(),
                    target: attr_value(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Slide size and the `r:id` of every `<p:sldId>`, in order.
fn parse_presentation(xml: &str) -> Result<(i64, i64, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let (mut width, mut height) = (0, 0);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"sldId" => {
                        if let Some(id) = attr_value(e, b"r:id") {
                            ids.push(id);
                        }
                    }
                    b"sldSz" => {
                        width = attr_i64(e, b"cx");
                        height = attr_i64(e, b"cy");
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok((width, height, ids))
}

/// Archive paths of the slides in presentation order.
///
/// Follows `sldIdLst` when present; otherwise sorts the slide relationships
/// by the number in their id or target.
fn slide_order(rels: &[Relationship], slide_rel_ids: &[String]) -> Vec<String> {
    let slide_rels: Vec<&Relationship> = rels
        .iter()
        .filter(|r| r.rel_type.ends_with("/slide"))
        .collect();

    if !slide_rel_ids.is_empty() {
        let by_id: HashMap<&str, &Relationship> =
            slide_rels.iter().map(|r| (r.id.as_str(), *r)).collect();
        return slide_rel_ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()))
            .map(|r| resolve_target("ppt", &r.target))
            .collect();
    }

    let mut slides: Vec<(String, Option<usize>)> = slide_rels
        .iter()
        .map(|r| {
            let order = extract_slide_number(&r.id).or_else(|| extract_slide_number(&r.target));
            (resolve_target("ppt", &r.target), order)
        })
        .collect();
    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    slides.into_iter().map(|(path, _)| path).collect()
}

fn parse_core_title(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut in_title = false;
    let mut title = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"title" => {
                in_title = true;
            }
            Ok(Event::Text(ref e)) if in_title => {
                let text = e.unescape().unwrap_or_default();
                if !text.is_empty() {
                    title = Some(text.to_string());
                }
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"title" => {
                in_title = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing core properties: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(title)
}

fn parse_layout_name(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if local_name(e.name().as_ref()) == b"cSld" =>
            {
                return Ok(attr_value(e, b"name"));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing layout: {}", e)));
            }
            _ => {}
        }
    }
}

/// Shape being assembled while its element is open.
enum ShapeInProgress {
    Text(TextFrameSummary),
    Picture(PictureSummary),
}

impl ShapeInProgress {
    fn set_name(&mut self, e: &BytesStart<'_>) {
        let name = attr_value(e, b"name").unwrap_or_default();
        match self {
            Self::Text(t) => t.name = name,
            Self::Picture(p) => {
                p.name = name;
                p.description = attr_value(e, b"descr").unwrap_or_default();
            }
        }
    }

    fn frame_mut(&mut self) -> &mut Option<Rect> {
        match self {
            Self::Text(t) => &mut t.frame,
            Self::Picture(p) => &mut p.frame,
        }
    }
}

/// Apply an `<a:off>` or `<a:ext>` element to the shape's frame.
fn apply_transform(shape: &mut ShapeInProgress, e: &BytesStart<'_>) {
    let frame = shape.frame_mut().get_or_insert_with(Rect::default);
    match local_name(e.name().as_ref()) {
        b"off" => {
            frame.x = attr_i64(e, b"x");
            frame.y = attr_i64(e, b"y");
        }
        b"ext" => {
            frame.width = attr_i64(e, b"cx");
            frame.height = attr_i64(e, b"cy");
        }
        _ => {}
    }
}

/// Handle a start or empty element inside the current shape.
fn visit_element(
    shape: &mut ShapeInProgress,
    e: &BytesStart<'_>,
    in_xfrm: bool,
    paragraph: &mut Option<String>,
) {
    match local_name(e.name().as_ref()) {
        b"cNvPr" => shape.set_name(e),
        b"ph" => {
            if let ShapeInProgress::Text(t) = shape {
                // A placeholder without a type is a body placeholder.
                t.placeholder = Some(attr_value(e, b"type").unwrap_or_else(|| "body".to_string()));
            }
        }
        b"off" | b"ext" if in_xfrm => apply_transform(shape, e),
        b"blip" => {
            if let ShapeInProgress::Picture(p) = shape {
                p.target = attr_value(e, b"r:embed");
            }
        }
        b"p" => *paragraph = Some(String::new()),
        _ => {}
    }
}

/// Extract text frames and pictures from a slide part.
///
/// Picture targets hold the raw `r:embed` id; the caller resolves them.
fn extract_shapes(xml: &str) -> Result<(Vec<TextFrameSummary>, Vec<PictureSummary>)> {
    let mut texts = Vec::new();
    let mut pictures = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<ShapeInProgress> = None;
    let mut paragraph: Option<String> = None;
    let mut in_xfrm = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(ShapeInProgress::Text(TextFrameSummary::default())),
                b"pic" => current = Some(ShapeInProgress::Picture(PictureSummary::default())),
                b"xfrm" => in_xfrm = true,
                b"t" => in_text = true,
                _ => {
                    if let Some(shape) = current.as_mut() {
                        visit_element(shape, e, in_xfrm, &mut paragraph);
                    }
                }
            },
            Ok(Event::Empty(ref e)) => {
                if let Some(shape) = current.as_mut() {
                    // `<a:p/>` is an empty paragraph and adds nothing.
                    if local_name(e.name().as_ref()) != b"p" {
                        visit_element(shape, e, in_xfrm, &mut paragraph);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(p) = paragraph.as_mut() {
                        p.push_str(&e.unescape().unwrap_or_default());
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" | b"pic" => match current.take() {
                    Some(ShapeInProgress::Text(t)) => texts.push(t),
                    Some(ShapeInProgress::Picture(p)) => pictures.push(p),
                    None => {}
                },
                b"xfrm" => in_xfrm = false,
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(text), Some(ShapeInProgress::Text(t))) =
                        (paragraph.take(), current.as_mut())
                    {
                        let text = text.trim();
                        if !text.is_empty() {
                            t.paragraphs.push(text.to_string());
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    Ok((texts, pictures))
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`.
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/slides", "../slideLayouts/slideLayout2.xml"),
            "ppt/slideLayouts/slideLayout2.xml"
        );
        assert_eq!(resolve_target("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("ppt/slides", "/ppt/media/a.png"), "ppt/media/a.png");
        assert_eq!(
            rels_path_for("ppt/slides/slide4.xml"),
            "ppt/slides/_rels/slide4.xml.rels"
        );
    }

    #[test]
    fn test_slide_order_follows_id_list() {
        let rels = vec![
            Relationship {
                id: "rId2".into(),
                rel_type: "http://x/relationships/slide".into(),
                target: "slides/slide1.xml".into(),
            },
            Relationship {
                id: "rId3".into(),
                rel_type: "http://x/relationships/slide".into(),
                target: "slides/slide2.xml".into(),
            },
            Relationship {
                id: "rId1".into(),
                rel_type: "http://x/relationships/slideMaster".into(),
                target: "slideMasters/slideMaster1.xml".into(),
            },
        ];
        let ordered = slide_order(&rels, &["rId3".to_string(), "rId2".to_string()]);
        assert_eq!(ordered, vec!["ppt/slides/slide2.xml", "ppt/slides/slide1.xml"]);

        let fallback = slide_order(&rels, &[]);
        assert_eq!(fallback, vec!["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]);
    }

    #[test]
    fn test_extract_shapes() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p" xmlns:r="r"><p:cSld><p:spTree>
            <p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr>
            <p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></a:xfrm></p:grpSpPr>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
              <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
              <p:txBody><a:bodyPr/><a:p><a:r><a:t>Fish &amp; Chips</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr/>
              <p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
              <p:spPr><a:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm></p:spPr>
              <p:txBody><a:bodyPr/><a:p><a:r><a:t>One</a:t></a:r></a:p><a:p><a:endParaRPr/></a:p>
              <a:p><a:r><a:t>Two</a:t></a:r></a:p></p:txBody></p:sp>
            <p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture 3" descr="sea"/></p:nvPicPr>
              <p:blipFill><a:blip r:embed="rId2"/></p:blipFill>
              <p:spPr><a:xfrm><a:off x="5" y="6"/><a:ext cx="7" cy="8"/></a:xfrm></p:spPr></p:pic>
            </p:spTree></p:cSld></p:sld>"#;

        let (texts, pictures) = extract_shapes(xml).unwrap();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].placeholder.as_deref(), Some("title"));
        assert_eq!(texts[0].paragraphs, vec!["Fish & Chips"]);
        assert_eq!(texts[0].frame, None);
        assert_eq!(texts[1].placeholder.as_deref(), Some("body"));
        assert_eq!(texts[1].paragraphs, vec!["One", "Two"]);
        assert_eq!(texts[1].frame, Some(Rect::new(10, 20, 30, 40)));

        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].description, "sea");
        assert_eq!(pictures[0].target.as_deref(), Some("rId2"));
        assert_eq!(pictures[0].frame, Some(Rect::new(5, 6, 7, 8)));
    }
}
