//! Excel (`.xlsx`) report.
//!
//! A single sheet: merged title and date rows, a styled header on row 4, one
//! bordered row per calculation from row 5, and a bold `TOTAL:` row when more
//! than one calculation is exported. Text is stored as inline strings, so the
//! workbook needs no shared-strings part.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::exporters::package::{
    Package, RELATIONSHIPS_NS, STYLES_REL, XML_DECLARATION, escape, root_relationships,
};
use crate::exporters::{ExportTarget, Exporter, REPORT_TITLE, ReportMeta};
use crate::models::{CalculationResult, total_area, total_cost};

const SHEET_NAME: &str = "Material calculation";
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const DOC_REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const WORKSHEET_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

const COLUMNS: u32 = 6;
const HEADER_ROW: u32 = 4;
const FIRST_DATA_ROW: u32 = 5;

/// Indices into `cellXfs` in `xl/styles.xml`.
mod style {
    pub const TITLE: u32 = 1;
    pub const DATE: u32 = 2;
    pub const HEADER: u32 = 3;
    pub const BORDERED: u32 = 4;
    pub const BORDERED_DECIMAL: u32 = 5;
    pub const BORDERED_MONEY: u32 = 6;
    pub const BOLD: u32 = 7;
    pub const BOLD_DECIMAL: u32 = 8;
    pub const BOLD_MONEY: u32 = 9;
}

/// Exports results as a SpreadsheetML workbook.
#[derive(Debug, Clone)]
pub struct ExcelExporter {
    target: ExportTarget,
    currency: String,
}

impl ExcelExporter {
    pub fn new(filename: Option<PathBuf>, output_dir: impl Into<PathBuf>, currency: impl Into<String>) -> Self {
        Self {
            target: ExportTarget::new(filename, output_dir),
            currency: currency.into(),
        }
    }
}

impl Exporter for ExcelExporter {
    fn extension(&self) -> &'static str {
        "xlsx"
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
        let sheet = build_sheet(results, meta);

        let mut package = Package::create(path)?;
        package.add_part("[Content_Types].xml", CONTENT_TYPES)?;
        package.add_part("_rels/.rels", &root_relationships("xl/workbook.xml"))?;
        package.add_part("xl/workbook.xml", &workbook_xml())?;
        package.add_part("xl/_rels/workbook.xml.rels", &workbook_relationships())?;
        package.add_part("xl/styles.xml", &styles_xml(&meta.currency))?;
        package.add_part("xl/worksheets/sheet1.xml", &sheet.to_xml())?;
        package.finish()
    }
}

impl std::fmt::Display for ExcelExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.target.describe("ExcelExporter"))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text length used for column sizing.
    fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Number(n) => n.to_string().chars().count(),
        }
    }
}

#[derive(Debug, Clone)]
struct Cell {
    value: CellValue,
    style: u32,
}

/// Sparse grid of cells keyed by (row, column), both 1-based.
#[derive(Debug, Default)]
struct Sheet {
    cells: BTreeMap<(u32, u32), Cell>,
    merged: Vec<(u32, String)>,
}

impl Sheet {
    fn set(&mut self, row: u32, col: u32, value: CellValue, style: u32) {
        self.cells.insert((row, col), Cell { value, style });
    }

    fn text(&mut self, row: u32, col: u32, text: impl Into<String>, style: u32) {
        self.set(row, col, CellValue::Text(text.into()), style);
    }

    fn number(&mut self, row: u32, col: u32, value: f64, style: u32) {
        self.set(row, col, CellValue::Number(value), style);
    }

    /// Merge columns `A..F` of `row`.
    fn merge_row(&mut self, row: u32) {
        let range = format!("A{row}:{}{row}", column_letter(COLUMNS));
        self.merged.push((row, range));
    }

    /// `(longest text + 2) × 1.2` per column, ignoring merged rows.
    fn column_widths(&self) -> Vec<f64> {
        (1..=COLUMNS)
            .map(|col| {
                let longest = self
                    .cells
                    .iter()
                    .filter(|((row, c), _)| *c == col && !self.merged.iter().any(|(m, _)| m == row))
                    .map(|(_, cell)| cell.value.display_len())
                    .max()
                    .unwrap_or(0);
                (longest + 2) as f64 * 1.2
            })
            .collect()
    }

    fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(&format!(r#"<worksheet xmlns="{MAIN_NS}" xmlns:r="{DOC_REL_NS}">"#));

        out.push_str("<cols>");
        for (idx, width) in self.column_widths().iter().enumerate() {
            let col = idx + 1;
            out.push_str(&format!(
                r#"<col min="{col}" max="{col}" width="{width:.2}" customWidth="1"/>"#
            ));
        }
        out.push_str("</cols>");

        out.push_str("<sheetData>");
        let mut current_row = None;
        for (&(row, col), cell) in &self.cells {
            if current_row != Some(row) {
                if current_row.is_some() {
                    out.push_str("</row>");
                }
                out.push_str(&format!(r#"<row r="{row}">"#));
                current_row = Some(row);
            }
            let reference = format!("{}{row}", column_letter(col));
            match &cell.value {
                CellValue::Text(text) => out.push_str(&format!(
                    r#"<c r="{reference}" s="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    cell.style,
                    escape(text)
                )),
                CellValue::Number(n) => out.push_str(&format!(
                    r#"<c r="{reference}" s="{}"><v>{n}</v></c>"#,
                    cell.style
                )),
            }
        }
        if current_row.is_some() {
            out.push_str("</row>");
        }
        out.push_str("</sheetData>");

        if !self.merged.is_empty() {
            out.push_str(&format!(r#"<mergeCells count="{}">"#, self.merged.len()));
            for (_, range) in &self.merged {
                out.push_str(&format!(r#"<mergeCell ref="{range}"/>"#));
            }
            out.push_str("</mergeCells>");
        }

        out.push_str("</worksheet>");
        out
    }
}

/// 1 -> `A`, 26 -> `Z`, 27 -> `AA`.
fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn build_sheet(results: &[CalculationResult], meta: &ReportMeta) -> Sheet {
    let mut sheet = Sheet::default();

    sheet.text(1, 1, REPORT_TITLE.to_uppercase(), style::TITLE);
    sheet.merge_row(1);
    sheet.text(2, 1, meta.date_line(), style::DATE);
    sheet.merge_row(2);

    let headers = [
        "No.".to_string(),
        "Material".to_string(),
        "Area (m²)".to_string(),
        "Reserve (%)".to_string(),
        "Units".to_string(),
        format!("Cost ({})", meta.currency),
    ];
    for (col, header) in (1..).zip(headers) {
        sheet.text(HEADER_ROW, col, header, style::HEADER);
    }

    let mut row = FIRST_DATA_ROW;
    for (idx, result) in results.iter().enumerate() {
        sheet.number(row, 1, (idx + 1) as f64, style::BORDERED);
        sheet.text(row, 2, result.material.name.clone(), style::BORDERED);
        sheet.number(row, 3, result.area, style::BORDERED_DECIMAL);
        sheet.number(row, 4, result.reserve_percent, style::BORDERED);
        sheet.number(row, 5, result.units_needed as f64, style::BORDERED);
        sheet.number(row, 6, result.total_cost, style::BORDERED_MONEY);
        row += 1;
    }

    if results.len() > 1 {
        row += 1;
        sheet.text(row, 1, "TOTAL:", style::BOLD);
        sheet.number(row, 3, total_area(results), style::BOLD_DECIMAL);
        sheet.number(row, 6, total_cost(results), style::BOLD_MONEY);
    }

    sheet
}

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#
);

fn workbook_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<workbook xmlns="{MAIN_NS}" xmlns:r="{DOC_REL_NS}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape(SHEET_NAME)
    )
}

fn workbook_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{RELATIONSHIPS_NS}"><Relationship Id="rId1" Type="{WORKSHEET_REL}" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="{STYLES_REL}" Target="styles.xml"/></Relationships>"#
    )
}

/// Custom number format id for money cells (ids below 164 are built in).
const MONEY_FORMAT_ID: u32 = 164;
/// Built-in `0.00`.
const DECIMAL_FORMAT_ID: u32 = 2;

fn styles_xml(currency: &str) -> String {
    let money_format = format!("#,##0.00 \"{currency}\"");
    let thin = r#"<left style="thin"><color auto="1"/></left><right style="thin"><color auto="1"/></right><top style="thin"><color auto="1"/></top><bottom style="thin"><color auto="1"/></bottom><diagonal/>"#;

    // (numFmtId, fontId, fillId, borderId, alignment)
    let xfs: [(u32, u32, u32, u32, Option<&str>); 10] = [
        (0, 0, 0, 0, None),
        (0, 1, 0, 0, Some(r#"<alignment horizontal="center" vertical="center"/>"#)),
        (0, 0, 0, 0, Some(r#"<alignment horizontal="right"/>"#)),
        (0, 2, 2, 1, Some(r#"<alignment horizontal="center" vertical="center"/>"#)),
        (0, 0, 0, 1, None),
        (DECIMAL_FORMAT_ID, 0, 0, 1, None),
        (MONEY_FORMAT_ID, 0, 0, 1, None),
        (0, 3, 0, 0, None),
        (DECIMAL_FORMAT_ID, 3, 0, 0, None),
        (MONEY_FORMAT_ID, 3, 0, 0, None),
    ];

    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push_str(&format!(r#"<styleSheet xmlns="{MAIN_NS}">"#));
    out.push_str(&format!(
        r#"<numFmts count="1"><numFmt numFmtId="{MONEY_FORMAT_ID}" formatCode="{}"/></numFmts>"#,
        escape(&money_format)
    ));
    out.push_str(concat!(
        r#"<fonts count="4">"#,
        r#"<font><sz val="11"/><name val="Calibri"/></font>"#,
        r#"<font><b/><sz val="14"/><name val="Calibri"/></font>"#,
        r#"<font><b/><sz val="12"/><color rgb="FFFFFFFF"/><name val="Calibri"/></font>"#,
        r#"<font><b/><sz val="11"/><name val="Calibri"/></font>"#,
        r#"</fonts>"#,
        r#"<fills count="3">"#,
        r#"<fill><patternFill patternType="none"/></fill>"#,
        r#"<fill><patternFill patternType="gray125"/></fill>"#,
        r#"<fill><patternFill patternType="solid"><fgColor rgb="FF4472C4"/><bgColor rgb="FF4472C4"/></patternFill></fill>"#,
        r#"</fills>"#,
    ));
    out.push_str(&format!(
        r#"<borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border>{thin}</border></borders>"#
    ));
    out.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

    out.push_str(&format!(r#"<cellXfs count="{}">"#, xfs.len()));
    for (num_fmt, font, fill, border, alignment) in xfs {
        let mut attrs = format!(r#"numFmtId="{num_fmt}" fontId="{font}" fillId="{fill}" borderId="{border}" xfId="0""#);
        if num_fmt != 0 {
            attrs.push_str(r#" applyNumberFormat="1""#);
        }
        if font != 0 {
            attrs.push_str(r#" applyFont="1""#);
        }
        if fill != 0 {
            attrs.push_str(r#" applyFill="1""#);
        }
        if border != 0 {
            attrs.push_str(r#" applyBorder="1""#);
        }
        match alignment {
            Some(alignment) => out.push_str(&format!(r#"<xf {attrs} applyAlignment="1">{alignment}</xf>"#)),
            None => out.push_str(&format!("<xf {attrs}/>")),
        }
    }
    out.push_str("</cellXfs>");

    out.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
    out.push_str("</styleSheet>");
    out
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
    fn column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(6), "F");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
    }

    #[test]
    fn sheet_layout_for_one_result() {
        let sheet = build_sheet(&[result("Paint", 12.0, 300.0)], &meta());
        assert_eq!(sheet.cells[&(4, 1)].value, CellValue::Text("No.".to_string()));
        assert_eq!(sheet.cells[&(4, 6)].value, CellValue::Text("Cost (₽)".to_string()));
        assert_eq!(sheet.cells[&(5, 2)].value, CellValue::Text("Paint".to_string()));
        assert_eq!(sheet.cells[&(5, 6)].value, CellValue::Number(300.0));
        assert_eq!(sheet.cells[&(5, 6)].style, style::BORDERED_MONEY);
        // No totals for a single result.
        assert!(!sheet.cells.keys().any(|(row, _)| *row > 5));
    }

    #[test]
    fn totals_row_for_several_results() {
        let sheet = build_sheet(
            &[result("Paint", 12.0, 300.0), result("Tile", 8.5, 1200.5)],
            &meta(),
        );
        // Rows 5-6 hold data, row 7 is blank, row 8 holds totals.
        assert!(!sheet.cells.keys().any(|(row, _)| *row == 7));
        assert_eq!(sheet.cells[&(8, 1)].value, CellValue::Text("TOTAL:".to_string()));
        assert_eq!(sheet.cells[&(8, 3)].value, CellValue::Number(20.5));
        assert_eq!(sheet.cells[&(8, 6)].value, CellValue::Number(1500.5));
    }

    #[test]
    fn widths_ignore_merged_title() {
        let sheet = build_sheet(&[result("Paint", 12.0, 300.0)], &meta());
        let widths = sheet.column_widths();
        // Column A: "No." is the longest non-merged text.
        assert!((widths[0] - 6.0).abs() < 1e-9);
        // Column B: "Material" (8 chars).
        assert!((widths[1] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn sheet_xml_has_merges_and_inline_strings() {
        let xml = build_sheet(&[result("A & B", 12.0, 300.0)], &meta()).to_xml();
        assert!(xml.contains(r#"<mergeCell ref="A1:F1"/>"#));
        assert!(xml.contains(r#"<mergeCell ref="A2:F2"/>"#));
        assert!(xml.contains("A &amp; B"));
        assert!(xml.contains(r#"<c r="F5" s="6"><v>300</v></c>"#));
    }

    #[test]
    fn money_format_uses_currency() {
        let xml = styles_xml("₽");
        assert!(xml.contains(r##"formatCode="#,##0.00 &quot;₽&quot;""##));
        assert!(xml.contains(r#"<cellXfs count="10">"#));
    }

    #[test]
    fn export_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let mut exporter = ExcelExporter::new(Some(path.clone()), dir.path(), "₽");

        exporter.export(&[result("Paint", 12.0, 300.0)]).unwrap();
        exporter.export(&[result("Tile", 8.0, 100.0)]).unwrap();
        assert_eq!(exporter.target().export_count(), 2);

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let mut workbook = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut workbook)
            .unwrap();
        assert!(workbook.contains(r#"name="Material calculation""#));

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        // The second export overwrote the first.
        assert!(sheet.contains("Tile"));
        assert!(!sheet.contains("Paint"));
    }
}
