//! Word (`.docx`) report.
//!
//! Layout:
//! - centered title, italic right-aligned date line
//! - per calculation: a level-2 heading and a 5×2 table, the cost row in bold
//! - for several calculations: a page break and a summary section

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::exporters::package::{
    Package, RELATIONSHIPS_NS, STYLES_REL, XML_DECLARATION, escape, root_relationships,
};
use crate::exporters::{ExportTarget, Exporter, REPORT_TITLE, ReportMeta};
use crate::models::{CalculationResult, total_area, total_cost};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Exports results as a WordprocessingML document.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    target: ExportTarget,
    currency: String,
}

impl DocxExporter {
    pub fn new(filename: Option<PathBuf>, output_dir: impl Into<PathBuf>, currency: impl Into<String>) -> Self {
        Self {
            target: ExportTarget::new(filename, output_dir),
            currency: currency.into(),
        }
    }
}

impl Exporter for DocxExporter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn target(&self) -> &ExportTarget {
        &self.target
    }

    fn target_mut(&mut self) -> &mut ExportTarget {
        &mut self.target
    }

    fn meta(&self) -> ReportMeta {
        ReportMeta::now(self.currency.clone())
    }

    fn render(&self, results: &[CalculationResult], meta: &ReportMeta, path: &Path) -> Result<(), AppError> {
        let mut package = Package::create(path)?;
        package.add_part("[Content_Types].xml", CONTENT_TYPES)?;
        package.add_part("_rels/.rels", &root_relationships("word/document.xml"))?;
        package.add_part("word/_rels/document.xml.rels", &document_relationships())?;
        package.add_part("word/styles.xml", &styles())?;
        package.add_part("word/document.xml", &document_xml(results, meta))?;
        package.finish()
    }
}

impl std::fmt::Display for DocxExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.target.describe("DocxExporter"))
    }
}

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"</Types>"#
);

fn document_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{RELATIONSHIPS_NS}"><Relationship Id="rId1" Type="{STYLES_REL}" Target="styles.xml"/></Relationships>"#
    )
}

fn styles() -> String {
    let heading = |id: &str, name: &str, size: u32, outline: u32| {
        format!(
            r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="{size}"/></w:rPr></w:style>"#
        )
    };

    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push_str(&format!(r#"<w:styles xmlns:w="{W_NS}">"#));
    out.push_str(r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults>"#);
    out.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);
    out.push_str(r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:sz w:val="52"/></w:rPr></w:style>"#);
    out.push_str(&heading("Heading1", "heading 1", 32, 0));
    out.push_str(&heading("Heading2", "heading 2", 26, 1));
    out.push_str(r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders>"#);
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        out.push_str(&format!(r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="4472C4"/>"#));
    }
    out.push_str(r#"</w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#);
    out.push_str("</w:styles>");
    out
}

/// A run of text with character formatting.
#[derive(Debug, Clone, Default)]
struct Run {
    text: String,
    bold: bool,
    italic: bool,
    /// Font size in half-points.
    size: Option<u32>,
    line_break: bool,
}

impl Run {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn size_pt(mut self, points: u32) -> Self {
        self.size = Some(points * 2);
        self
    }

    fn line_break(mut self) -> Self {
        self.line_break = true;
        self
    }

    fn to_xml(&self) -> String {
        let mut props = String::new();
        if self.bold {
            props.push_str("<w:b/>");
        }
        if self.italic {
            props.push_str("<w:i/>");
        }
        if let Some(size) = self.size {
            props.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
        }

        let mut out = String::from("<w:r>");
        if !props.is_empty() {
            out.push_str(&format!("<w:rPr>{props}</w:rPr>"));
        }
        out.push_str(&format!(
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            escape(&self.text)
        ));
        if self.line_break {
            out.push_str("<w:br/>");
        }
        out.push_str("</w:r>");
        out
    }
}

fn paragraph(style: Option<&str>, align: Option<&str>, runs: &[Run]) -> String {
    let mut props = String::new();
    if let Some(style) = style {
        props.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
    }
    if let Some(align) = align {
        props.push_str(&format!(r#"<w:jc w:val="{align}"/>"#));
    }

    let mut out = String::from("<w:p>");
    if !props.is_empty() {
        out.push_str(&format!("<w:pPr>{props}</w:pPr>"));
    }
    for run in runs {
        out.push_str(&run.to_xml());
    }
    out.push_str("</w:p>");
    out
}

fn empty_paragraph() -> String {
    "<w:p/>".to_string()
}

fn page_break() -> String {
    r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#.to_string()
}

fn table(rows: &[[Vec<Run>; 2]]) -> String {
    let mut out = String::from(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="5000" w:type="pct"/></w:tblPr><w:tblGrid><w:gridCol w:w="4677"/><w:gridCol w:w="4677"/></w:tblGrid>"#,
    );
    for row in rows {
        out.push_str("<w:tr>");
        for cell in row {
            out.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="2500" w:type="pct"/></w:tcPr>"#);
            out.push_str(&paragraph(None, None, cell));
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
    out
}

fn result_table(result: &CalculationResult, currency: &str) -> String {
    let plain = |label: &str, value: String| [vec![Run::text(label)], vec![Run::text(value)]];
    let cost_label = Run::text("Total cost:").bold().size_pt(12);
    let cost_value = Run::text(format!("{:.2} {currency}", result.total_cost))
        .bold()
        .size_pt(12);

    table(&[
        plain("Material:", result.material.name.clone()),
        plain("Coverage area:", format!("{:.2} m²", result.area)),
        plain("Reserve:", format!("{}%", result.reserve_percent)),
        plain("Units needed:", result.units_needed.to_string()),
        [vec![cost_label], vec![cost_value]],
    ])
}

/// Body of `word/document.xml`.
pub(crate) fn document_xml(results: &[CalculationResult], meta: &ReportMeta) -> String {
    let mut body = String::new();

    body.push_str(&paragraph(Some("Title"), Some("center"), &[Run::text(REPORT_TITLE)]));
    body.push_str(&paragraph(None, Some("right"), &[Run::text(meta.date_line()).italic()]));
    body.push_str(&empty_paragraph());

    for (idx, result) in results.iter().enumerate() {
        body.push_str(&paragraph(
            Some("Heading2"),
            None,
            &[Run::text(format!("Calculation #{}: {}", idx + 1, result.material.name))],
        ));
        body.push_str(&result_table(result, &meta.currency));
        body.push_str(&empty_paragraph());
    }

    if results.len() > 1 {
        body.push_str(&page_break());
        body.push_str(&paragraph(Some("Heading1"), None, &[Run::text("Summary")]));
        body.push_str(&paragraph(
            None,
            None,
            &[
                Run::text(format!("Total calculations: {}", results.len()))
                    .bold()
                    .line_break(),
                Run::text(format!("Total area: {:.2} m²", total_area(results))).line_break(),
                Run::text(format!("Total cost: {:.2} {}", total_cost(results), meta.currency)).bold(),
            ],
        ));
    }

    format!(
        r#"{XML_DECLARATION}<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="850" w:bottom="1134" w:left="1701" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use chrono::NaiveDate;

    use super::*;
    use crate::models::Material;

    fn meta() -> ReportMeta {
        ReportMeta {
            generated_at: NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            currency: "₽".to_string(),
        }
    }

    fn result(name: &str, area: f64, cost: f64) -> CalculationResult {
        CalculationResult {
            material: Material::new(name, 100.0, 5.0).unwrap(),
            area,
            units_needed: 3,
            total_cost: cost,
            reserve_percent: 10.0,
        }
    }

    #[test]
    fn single_result_has_table_and_no_summary() {
        let xml = document_xml(&[result("Paint", 12.0, 300.0)], &meta());
        assert!(xml.contains(REPORT_TITLE));
        assert!(xml.contains("Date: 01.05.2025 10:30"));
        assert!(xml.contains("Calculation #1: Paint"));
        assert!(xml.contains("12.00 m²"));
        assert!(xml.contains("300.00 ₽"));
        assert!(xml.contains("10%"));
        assert!(!xml.contains("Summary"));
        assert_eq!(xml.matches("<w:tr>").count(), 5);
    }

    #[test]
    fn several_results_add_summary() {
        let xml = document_xml(
            &[result("Paint", 12.0, 300.0), result("Tile", 8.5, 1200.5)],
            &meta(),
        );
        assert!(xml.contains("Calculation #2: Tile"));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.contains("Total calculations: 2"));
        assert!(xml.contains("Total area: 20.50 m²"));
        assert!(xml.contains("Total cost: 1500.50 ₽"));
    }

    #[test]
    fn material_names_are_escaped() {
        let xml = document_xml(&[result("Black & White <matte>", 1.0, 1.0)], &meta());
        assert!(xml.contains("Black &amp; White &lt;matte&gt;"));
    }

    #[test]
    fn export_writes_package_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        let mut exporter = DocxExporter::new(Some(path.clone()), dir.path(), "₽");

        let written = exporter.export(&[result("Paint", 12.0, 300.0)]).unwrap();
        assert_eq!(written, path);
        assert_eq!(exporter.target().export_count(), 1);

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/styles.xml"] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }
        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("Calculation #1: Paint"));
    }

    #[test]
    fn export_rejects_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = DocxExporter::new(None, dir.path(), "₽");
        let err = exporter.export(&[]).unwrap_err();
        assert_eq!(err.message(), "No data to export");
        assert_eq!(exporter.target().export_count(), 0);
        assert!(exporter.target().filename().is_none());
    }

    #[test]
    fn generated_name_lands_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = DocxExporter::new(None, dir.path(), "$");
        let written = exporter.export(&[result("Paint", 12.0, 300.0)]).unwrap();
        assert!(written.starts_with(dir.path()));
        assert!(written.extension().is_some_and(|e| e == "docx"));
        assert!(written.exists());
        assert!(exporter.to_string().ends_with("exports: 1)"));
    }
}
