use std::path::Path;

use lopdf::{Document, Object, Stream, dictionary};

use crate::error::PdfRetextError;
use crate::raster::RenderedPage;

/// Assembles rendered page images into a single multi-page PDF.
///
/// Pages are appended in call order and keep that order in the output.
/// Each page's content stream draws one full-page JPEG XObject, with the
/// MediaBox equal to the image's pixel dimensions.
pub struct PageWriter {
    doc: Document,
    pages_id: lopdf::ObjectId,
    page_ids: Vec<lopdf::ObjectId>,
}

impl PageWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Add a JPEG image XObject.
    ///
    /// Returns the XObject's object ID.
    fn add_image_xobject(&mut self, jpeg_data: &[u8], width: u32, height: u32) -> lopdf::ObjectId {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        let stream = Stream::new(dict, jpeg_data.to_vec());
        self.doc.add_object(Object::Stream(stream))
    }

    /// Content stream bytes drawing one image over the full page:
    /// `q <width> 0 0 <height> 0 0 cm /<name> Do Q`
    fn build_page_content(name: &str, width: u32, height: u32) -> Vec<u8> {
        format!("q {width} 0 0 {height} 0 0 cm /{name} Do Q").into_bytes()
    }

    /// Append one rendered page to the document.
    pub fn add_page(&mut self, page: &RenderedPage) {
        let image_id = self.add_image_xobject(&page.jpeg, page.width, page.height);

        let mut xobject_dict = lopdf::Dictionary::new();
        xobject_dict.set("PageImg", Object::Reference(image_id));

        let resources_id = self.doc.add_object(dictionary! {
            "XObject" => Object::Dictionary(xobject_dict),
        });

        let content_bytes = Self::build_page_content("PageImg", page.width, page.height);
        let content_stream = Stream::new(dictionary! {}, content_bytes);
        let content_id = self.doc.add_object(Object::Stream(content_stream));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(page.width as i64),
                Object::Integer(page.height as i64),
            ],
            "Resources" => resources_id,
            "Contents" => content_id,
        });

        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Wire the Pages tree and Catalog.
    ///
    /// Fails with an empty document error when no page was added.
    pub fn finish(&mut self) -> crate::error::Result<()> {
        if self.page_ids.is_empty() {
            return Err(PdfRetextError::empty_document(
                "no rendered pages to assemble",
            ));
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        Ok(())
    }

    /// Output the PDF document as bytes.
    pub fn save_to_bytes(&self) -> crate::error::Result<Vec<u8>> {
        let mut buf = Vec::new();
        // clone to avoid borrowing issues with save_to (takes &mut self in lopdf)
        self.doc
            .clone()
            .save_to(&mut buf)
            .map_err(|e| PdfRetextError::pdf_write(e.to_string()))?;
        Ok(buf)
    }

    /// Write the PDF to `path`, creating the parent directory if missing.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = self.save_to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}
