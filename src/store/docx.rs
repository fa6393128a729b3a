use anyhow::{anyhow, Context, Result};
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Extract the full text of a DOCX document: locate the main document
/// part through `_rels/.rels`, then collect the run text of every
/// paragraph, one paragraph per line.
pub fn extract_from_mem(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Failed to open docx archive")?;

    let doc_name = main_document_name(&mut archive)?;
    let mut xml = String::new();
    archive
        .by_name(&doc_name)
        .map_err(|_| anyhow!("Could not find document part {} in archive", doc_name))?
        .read_to_string(&mut xml)
        .context("Failed to read document part")?;

    let doc = roxmltree::Document::parse(&xml).context("Could not parse document XML")?;

    let mut paragraphs = Vec::new();
    for para in doc.descendants().filter(|elem| elem.has_tag_name("p")) {
        let mut line = String::new();
        for text_elem in para.descendants().filter(|elem| elem.has_tag_name("t")) {
            if let Some(text) = text_elem.text() {
                line.push_str(text);
            }
        }
        paragraphs.push(line);
    }

    Ok(paragraphs.join("\n"))
}

fn main_document_name<R>(archive: &mut ZipArchive<R>) -> Result<String>
where
    R: Read + Seek,
{
    let mut rels_buffer = String::new();
    archive
        .by_name("_rels/.rels")
        .map_err(|_| anyhow!("Docx archive has no _rels/.rels"))?
        .read_to_string(&mut rels_buffer)
        .context("Failed to read _rels/.rels")?;

    let rel_xml =
        roxmltree::Document::parse(&rels_buffer).context("Could not parse relationships XML")?;

    for elem in rel_xml.descendants() {
        if elem.attribute("Type") == Some(OFFICE_DOCUMENT_REL) {
            if let Some(target) = elem.attribute("Target") {
                // Targets are sometimes absolute within the archive
                return Ok(target.trim_start_matches('/').to_owned());
            }
        }
    }

    Err(anyhow!("Could not find main document part in relationships"))
}
