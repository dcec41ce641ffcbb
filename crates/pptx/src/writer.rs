//! PPTX package writer.
//!
//! Serializes a [`Deck`] into an OPC ZIP package: content types, package
//! relationships, document properties, the presentation part, the fixed
//! master/layouts/theme, one part per slide, and the media.

use crate::deck::{
    Alignment, Deck, MediaId, Paragraph, Picture, Shape, Slide, SlideLayout, TextShape,
};
use crate::templates::{self, content_type as ct, rel};
use deckgen_core::{Error, Rect, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// First `<p:sldId>` value; PowerPoint requires ids of at least 256.
const FIRST_SLIDE_ID: usize = 256;

/// Write `deck` as a `.pptx` package to `writer`.
pub fn write_package<W: Write + Seek>(deck: &Deck, writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let slide_count = deck.slide_count();

    let add = |zip: &mut ZipWriter<W>, path: &str, data: &[u8]| -> Result<()> {
        zip.start_file(path, options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
        zip.write_all(data)
            .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))
    };

    add(&mut zip, "[Content_Types].xml", &content_types_xml(deck)?)?;
    add(&mut zip, "_rels/.rels", &package_rels_xml()?)?;
    add(&mut zip, "docProps/core.xml", &core_props_xml(deck.title())?)?;
    add(&mut zip, "docProps/app.xml", &app_props_xml(slide_count)?)?;

    add(&mut zip, "ppt/presentation.xml", &presentation_xml(deck)?)?;
    add(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels_xml(slide_count)?,
    )?;

    add(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        templates::SLIDE_MASTER.as_bytes(),
    )?;
    add(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &master_rels_xml()?,
    )?;
    for layout in SlideLayout::ALL {
        let n = layout.part_number();
        add(
            &mut zip,
            &format!("ppt/slideLayouts/slideLayout{}.xml", n),
            templates::layout_xml(layout).as_bytes(),
        )?;
        add(
            &mut zip,
            &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
            &rels_xml(&[Relationship::new(
                1,
                rel::SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml",
            )])?,
        )?;
    }
    add(&mut zip, "ppt/theme/theme1.xml", templates::THEME.as_bytes())?;

    for (idx, slide) in deck.slides().iter().enumerate() {
        let n = idx + 1;
        let media_rels = slide_media_rels(deck, slide)?;
        add(
            &mut zip,
            &format!("ppt/slides/slide{}.xml", n),
            &slide_xml(slide, &media_rels)?,
        )?;
        add(
            &mut zip,
            &format!("ppt/slides/_rels/slide{}.xml.rels", n),
            &slide_rels_xml(slide.layout(), &media_rels)?,
        )?;
    }

    for (idx, media) in deck.media().iter().enumerate() {
        add(
            &mut zip,
            &media_part_name(idx, media.kind.extension()),
            &media.bytes,
        )?;
    }

    let mut inner = zip
        .finish()
        .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
    // The central directory may still sit in a buffered writer.
    inner.flush()?;
    Ok(())
}

fn media_part_name(idx: usize, extension: &str) -> String {
    format!("ppt/media/image{}.{}", idx + 1, extension)
}

/// A single `<Relationship>` entry.
struct Relationship {
    id: String,
    rel_type: &'static str,
    target: String,
}

impl Relationship {
    fn new(n: usize, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: format!("rId{}", n),
            rel_type,
            target: target.into(),
        }
    }
}

/// Picture media on a slide with the relationship id each one is embedded under.
///
/// rId1 is always the layout; media start at rId2 and repeat pictures of the
/// same image share one relationship.
struct MediaRel {
    media: MediaId,
    rel_id: String,
    target: String,
}

fn slide_media_rels(deck: &Deck, slide: &Slide) -> Result<Vec<MediaRel>> {
    let mut rels: Vec<MediaRel> = Vec::new();
    for picture in slide.pictures() {
        if rels.iter().any(|r| r.media == picture.media) {
            continue;
        }
        let item = deck.media_item(picture.media)?;
        rels.push(MediaRel {
            media: picture.media,
            rel_id: format!("rId{}", rels.len() + 2),
            target: format!("../media/image{}.{}", picture.media.0 + 1, item.kind.extension()),
        });
    }
    Ok(rels)
}

/// Thin wrapper over [`quick_xml::Writer`] that maps errors into ours.
struct XmlOut {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut out = Self {
            writer: Writer::new(Cursor::new(Vec::new())),
        };
        out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(e.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(elem))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(elem))
    }

    /// `<name>text</name>` with the text escaped.
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

fn rels_xml(rels: &[Relationship]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("Relationships", &[("xmlns", templates::NS_PACKAGE_RELS)])?;
    for r in rels {
        out.empty(
            "Relationship",
            &[
                ("Id", &r.id),
                ("Type", r.rel_type),
                ("Target", &r.target),
            ],
        )?;
    }
    out.end("Relationships")?;
    Ok(out.finish())
}

fn content_types_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("Types", &[("xmlns", templates::NS_CONTENT_TYPES)])?;

    out.empty(
        "Default",
        &[("Extension", "rels"), ("ContentType", ct::RELATIONSHIPS)],
    )?;
    out.empty("Default", &[("Extension", "xml"), ("ContentType", ct::XML)])?;

    let mut extensions: Vec<(&str, &str)> = deck
        .media()
        .iter()
        .map(|m| (m.kind.extension(), m.kind.content_type()))
        .collect();
    extensions.sort_unstable();
    extensions.dedup();
    for (ext, content_type) in extensions {
        out.empty(
            "Default",
            &[("Extension", ext), ("ContentType", content_type)],
        )?;
    }

    let mut overrides: Vec<(String, &str)> = vec![
        ("/ppt/presentation.xml".to_string(), ct::PRESENTATION),
        (
            "/ppt/slideMasters/slideMaster1.xml".to_string(),
            ct::SLIDE_MASTER,
        ),
        ("/ppt/theme/theme1.xml".to_string(), ct::THEME),
        ("/docProps/core.xml".to_string(), ct::CORE_PROPERTIES),
        ("/docProps/app.xml".to_string(), ct::EXTENDED_PROPERTIES),
    ];
    for layout in SlideLayout::ALL {
        overrides.push((
            format!("/ppt/slideLayouts/slideLayout{}.xml", layout.part_number()),
            ct::SLIDE_LAYOUT,
        ));
    }
    for n in 1..=deck.slide_count() {
        overrides.push((format!("/ppt/slides/slide{}.xml", n), ct::SLIDE));
    }
    for (part, content_type) in &overrides {
        out.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }

    out.end("Types")?;
    Ok(out.finish())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    rels_xml(&[
        Relationship::new(1, rel::OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship::new(2, rel::CORE_PROPERTIES, "docProps/core.xml"),
        Relationship::new(3, rel::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn core_props_xml(title: &str) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    out.text_element("dc:title", title)?;
    out.text_element("dc:creator", "deckgen")?;
    out.end("cp:coreProperties")?;
    Ok(out.finish())
}

fn app_props_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    out.text_element("Application", "deckgen")?;
    out.text_element("Slides", &slide_count.to_string())?;
    out.end("Properties")?;
    Ok(out.finish())
}

fn presentation_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "p:presentation",
        &[
            ("xmlns:a", templates::NS_A),
            ("xmlns:r", templates::NS_R),
            ("xmlns:p", templates::NS_P),
            ("saveSubsetFonts", "1"),
        ],
    )?;

    out.start("p:sldMasterIdLst", &[])?;
    out.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    out.end("p:sldMasterIdLst")?;

    if deck.slide_count() > 0 {
        out.start("p:sldIdLst", &[])?;
        for idx in 0..deck.slide_count() {
            out.empty(
                "p:sldId",
                &[
                    ("id", &(FIRST_SLIDE_ID + idx).to_string()),
                    ("r:id", &format!("rId{}", idx + 2)),
                ],
            )?;
        }
        out.end("p:sldIdLst")?;
    }

    out.empty(
        "p:sldSz",
        &[
            ("cx", &deck.width().to_string()),
            ("cy", &deck.height().to_string()),
        ],
    )?;
    out.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    out.end("p:presentation")?;
    Ok(out.finish())
}

/// rId1 is the master, slides follow, the theme comes last.
fn presentation_rels_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![Relationship::new(
        1,
        rel::SLIDE_MASTER,
        "slideMasters/slideMaster1.xml",
    )];
    for idx in 0..slide_count {
        rels.push(Relationship::new(
            idx + 2,
            rel::SLIDE,
            format!("slides/slide{}.xml", idx + 1),
        ));
    }
    rels.push(Relationship::new(
        slide_count + 2,
        rel::THEME,
        "theme/theme1.xml",
    ));
    rels_xml(&rels)
}

fn master_rels_xml() -> Result<Vec<u8>> {
    let mut rels: Vec<Relationship> = SlideLayout::ALL
        .iter()
        .map(|layout| {
            Relationship::new(
                layout.part_number(),
                rel::SLIDE_LAYOUT,
                format!("../slideLayouts/slideLayout{}.xml", layout.part_number()),
            )
        })
        .collect();
    rels.push(Relationship::new(
        SlideLayout::ALL.len() + 1,
        rel::THEME,
        "../theme/theme1.xml",
    ));
    rels_xml(&rels)
}

fn slide_rels_xml(layout: SlideLayout, media: &[MediaRel]) -> Result<Vec<u8>> {
    let mut rels = vec![Relationship::new(
        1,
        rel::SLIDE_LAYOUT,
        format!("../slideLayouts/slideLayout{}.xml", layout.part_number()),
    )];
    for m in media {
        rels.push(Relationship {
            id: m.rel_id.clone(),
            rel_type: rel::IMAGE,
            target: m.target.clone(),
        });
    }
    rels_xml(&rels)
}

/// Serialize one slide part.
fn slide_xml(slide: &Slide, media: &[MediaRel]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "p:sld",
        &[
            ("xmlns:a", templates::NS_A),
            ("xmlns:r", templates::NS_R),
            ("xmlns:p", templates::NS_P),
        ],
    )?;
    out.start("p:cSld", &[])?;
    out.start("p:spTree", &[])?;

    out.start("p:nvGrpSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    out.empty("p:cNvGrpSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvGrpSpPr")?;
    out.start("p:grpSpPr", &[])?;
    out.start("a:xfrm", &[])?;
    out.empty("a:off", &[("x", "0"), ("y", "0")])?;
    out.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    out.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    out.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    out.end("a:xfrm")?;
    out.end("p:grpSpPr")?;

    // Shape id 1 is the group itself.
    for (idx, shape) in slide.shapes().iter().enumerate() {
        let shape_id = idx + 2;
        match shape {
            Shape::Text(text) => write_text_shape(&mut out, shape_id, text)?,
            Shape::Picture(picture) => {
                let rel_id = media
                    .iter()
                    .find(|m| m.media == picture.media)
                    .map(|m| m.rel_id.as_str())
                    .ok_or_else(|| {
                        Error::CorruptedFile(format!(
                            "No relationship for media #{}",
                            picture.media.0
                        ))
                    })?;
                write_picture(&mut out, shape_id, picture, rel_id)?;
            }
        }
    }

    out.end("p:spTree")?;
    out.end("p:cSld")?;
    out.start("p:clrMapOvr", &[])?;
    out.empty("a:masterClrMapping", &[])?;
    out.end("p:clrMapOvr")?;
    out.end("p:sld")?;
    Ok(out.finish())
}

fn write_xfrm(out: &mut XmlOut, frame: &Rect) -> Result<()> {
    out.start("a:xfrm", &[])?;
    out.empty(
        "a:off",
        &[("x", &frame.x.to_string()), ("y", &frame.y.to_string())],
    )?;
    out.empty(
        "a:ext",
        &[
            ("cx", &frame.width.to_string()),
            ("cy", &frame.height.to_string()),
        ],
    )?;
    out.end("a:xfrm")
}

fn write_text_shape(out: &mut XmlOut, shape_id: usize, shape: &TextShape) -> Result<()> {
    out.start("p:sp", &[])?;

    out.start("p:nvSpPr", &[])?;
    out.empty(
        "p:cNvPr",
        &[("id", &shape_id.to_string()), ("name", &shape.name)],
    )?;
    match shape.placeholder {
        Some(ph) => {
            out.start("p:cNvSpPr", &[])?;
            out.empty("a:spLocks", &[("noGrp", "1")])?;
            out.end("p:cNvSpPr")?;
            out.start("p:nvPr", &[])?;
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(ph_type) = ph.ph_type() {
                attrs.push(("type", ph_type));
            }
            if let Some(idx) = ph.ph_idx() {
                attrs.push(("idx", idx));
            }
            out.empty("p:ph", &attrs)?;
            out.end("p:nvPr")?;
        }
        None => {
            out.empty("p:cNvSpPr", &[("txBox", "1")])?;
            out.empty("p:nvPr", &[])?;
        }
    }
    out.end("p:nvSpPr")?;

    out.start("p:spPr", &[])?;
    if let Some(frame) = &shape.frame {
        write_xfrm(out, frame)?;
    }
    if shape.placeholder.is_none() {
        out.start("a:prstGeom", &[("prst", "rect")])?;
        out.empty("a:avLst", &[])?;
        out.end("a:prstGeom")?;
        out.empty("a:noFill", &[])?;
    }
    out.end("p:spPr")?;

    out.start("p:txBody", &[])?;
    if shape.placeholder.is_some() {
        out.empty("a:bodyPr", &[])?;
    } else {
        let wrap = if shape.word_wrap { "square" } else { "none" };
        out.start("a:bodyPr", &[("wrap", wrap), ("rtlCol", "0")])?;
        out.empty("a:normAutofit", &[])?;
        out.end("a:bodyPr")?;
    }
    out.empty("a:lstStyle", &[])?;
    if shape.paragraphs.is_empty() {
        out.start("a:p", &[])?;
        out.empty("a:endParaRPr", &[("lang", "en-US")])?;
        out.end("a:p")?;
    }
    for paragraph in &shape.paragraphs {
        write_paragraph(out, paragraph)?;
    }
    out.end("p:txBody")?;

    out.end("p:sp")
}

/// Points to hundredths of a point, the unit of `sz` and `spcPts`.
fn centipoints(pt: f64) -> String {
    ((pt * 100.0).round() as i64).to_string()
}

fn write_paragraph(out: &mut XmlOut, paragraph: &Paragraph) -> Result<()> {
    out.start("a:p", &[])?;

    let level = paragraph.level.to_string();
    let mut ppr_attrs: Vec<(&str, &str)> = Vec::new();
    if paragraph.level > 0 {
        ppr_attrs.push(("lvl", &level));
    }
    match paragraph.alignment {
        Some(Alignment::Center) => ppr_attrs.push(("algn", "ctr")),
        Some(Alignment::Left) => ppr_attrs.push(("algn", "l")),
        None => {}
    }
    let has_spacing = paragraph.line_spacing.is_some()
        || paragraph.space_before_pt.is_some()
        || paragraph.space_after_pt.is_some();

    if has_spacing {
        out.start("a:pPr", &ppr_attrs)?;
        if let Some(multiple) = paragraph.line_spacing {
            out.start("a:lnSpc", &[])?;
            out.empty(
                "a:spcPct",
                &[("val", &((multiple * 100_000.0).round() as i64).to_string())],
            )?;
            out.end("a:lnSpc")?;
        }
        if let Some(pt) = paragraph.space_before_pt {
            out.start("a:spcBef", &[])?;
            out.empty("a:spcPts", &[("val", &centipoints(pt))])?;
            out.end("a:spcBef")?;
        }
        if let Some(pt) = paragraph.space_after_pt {
            out.start("a:spcAft", &[])?;
            out.empty("a:spcPts", &[("val", &centipoints(pt))])?;
            out.end("a:spcAft")?;
        }
        out.end("a:pPr")?;
    } else if !ppr_attrs.is_empty() {
        out.empty("a:pPr", &ppr_attrs)?;
    }

    let size = paragraph.size_pt.map(centipoints);
    let mut rpr_attrs: Vec<(&str, &str)> = vec![("lang", "en-US")];
    if let Some(size) = &size {
        rpr_attrs.push(("sz", size));
    }
    if paragraph.bold {
        rpr_attrs.push(("b", "1"));
    }
    rpr_attrs.push(("dirty", "0"));

    if !paragraph.text.is_empty() {
        out.start("a:r", &[])?;
        if paragraph.color.is_some() || paragraph.font.is_some() {
            out.start("a:rPr", &rpr_attrs)?;
            if let Some([r, g, b]) = paragraph.color {
                out.start("a:solidFill", &[])?;
                out.empty(
                    "a:srgbClr",
                    &[("val", &format!("{:02X}{:02X}{:02X}", r, g, b))],
                )?;
                out.end("a:solidFill")?;
            }
            if let Some(font) = &paragraph.font {
                out.empty("a:latin", &[("typeface", font)])?;
            }
            out.end("a:rPr")?;
        } else {
            out.empty("a:rPr", &rpr_attrs)?;
        }
        out.text_element("a:t", &paragraph.text)?;
        out.end("a:r")?;
    }

    out.empty("a:endParaRPr", &rpr_attrs)?;
    out.end("a:p")
}

fn write_picture(out: &mut XmlOut, shape_id: usize, picture: &Picture, rel_id: &str) -> Result<()> {
    out.start("p:pic", &[])?;

    out.start("p:nvPicPr", &[])?;
    out.empty(
        "p:cNvPr",
        &[
            ("id", &shape_id.to_string()),
            ("name", &format!("Picture {}", shape_id - 1)),
            ("descr", &picture.description),
        ],
    )?;
    out.start("p:cNvPicPr", &[])?;
    out.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    out.end("p:cNvPicPr")?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvPicPr")?;

    out.start("p:blipFill", &[])?;
    out.empty("a:blip", &[("r:embed", rel_id)])?;
    out.start("a:stretch", &[])?;
    out.empty("a:fillRect", &[])?;
    out.end("a:stretch")?;
    out.end("p:blipFill")?;

    out.start("p:spPr", &[])?;
    write_xfrm(out, &picture.frame)?;
    out.start("a:prstGeom", &[("prst", "rect")])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")?;
    out.end("p:spPr")?;

    out.end("p:pic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Paragraph, Placeholder, TextShape};
    use std::io::Read;
    use zip::ZipArchive;

    fn xml_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_text_is_escaped() {
        let mut slide = Slide::new(SlideLayout::Blank);
        slide.add_text(
            TextShape::text_box("Title 1", Rect::new(0, 0, 10, 10))
                .with_paragraph(Paragraph::new("Fish & <Chips>")),
        );
        let xml = xml_string(slide_xml(&slide, &[]).unwrap());
        assert!(xml.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn test_paragraph_formatting() {
        let mut slide = Slide::new(SlideLayout::TitleAndContent);
        slide.add_text(
            TextShape::placeholder("Content 2", Placeholder::Body).with_paragraph(
                Paragraph::new("Point")
                    .size(18.0)
                    .bold()
                    .color([51, 51, 51])
                    .font("Calibri")
                    .spacing(Some(8.0), Some(6.0))
                    .line_spacing(1.2),
            ),
        );
        let xml = xml_string(slide_xml(&slide, &[]).unwrap());
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains(r#"<a:spcPct val="120000"/>"#));
        assert!(xml.contains(r#"<a:spcBef><a:spcPts val="800"/></a:spcBef>"#));
        assert!(xml.contains(r#"<a:spcAft><a:spcPts val="600"/></a:spcAft>"#));
        assert!(xml.contains(r#"sz="1800" b="1""#));
        assert!(xml.contains(r#"<a:srgbClr val="333333"/>"#));
        assert!(xml.contains(r#"<a:latin typeface="Calibri"/>"#));
    }

    #[test]
    fn test_centered_title() {
        let mut slide = Slide::new(SlideLayout::Title);
        slide.add_text(
            TextShape::placeholder("Title 1", Placeholder::CenteredTitle)
                .with_paragraph(Paragraph::new("Deck").size(44.0).align(Alignment::Center)),
        );
        let xml = xml_string(slide_xml(&slide, &[]).unwrap());
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
    }

    #[test]
    fn test_package_parts() {
        let mut deck = Deck::default();
        deck.set_title("Parts");
        deck.push_slide(Slide::new(SlideLayout::Title));
        deck.push_slide(Slide::new(SlideLayout::Blank));

        let bytes = deck.to_bytes().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }

        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide2.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains("../slideLayouts/slideLayout3.xml"));

        let mut pres = String::new();
        archive
            .by_name("ppt/presentation.xml")
            .unwrap()
            .read_to_string(&mut pres)
            .unwrap();
        assert!(pres.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(pres.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    /// Accepts writes but fails on flush, like a full disk behind a `BufWriter`.
    struct FailingFlush(Cursor<Vec<u8>>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "file size limit exceeded",
            ))
        }
    }

    impl Seek for FailingFlush {
        fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
            self.0.seek(pos)
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let mut deck = Deck::default();
        deck.push_slide(Slide::new(SlideLayout::Title));

        let result = write_package(&deck, FailingFlush(Cursor::new(Vec::new())));
        assert!(result.is_err());
    }

    #[test]
    fn test_presentation_rels_put_theme_last() {
        let xml = xml_string(presentation_rels_xml(2).unwrap());
        assert!(xml.contains(r#"Id="rId3""#));
        assert!(xml.contains(r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#));
    }
}
