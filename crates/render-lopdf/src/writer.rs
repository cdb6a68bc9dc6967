use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use medreport_render_core::RenderError;
use medreport_types::Size;

/// Assembles page content streams into a complete PDF document.
///
/// The resources, page tree and catalog objects get fixed ids up front so
/// pages can reference them before the tree itself is written.
pub struct PdfWriter {
    doc: Document,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info: Option<Dictionary>,
}

impl PdfWriter {
    pub fn new(version: &str, resources: Dictionary) -> Self {
        let mut doc = Document::with_version(version);
        let resources_id = doc.new_object_id();
        let pages_id = doc.new_object_id();
        let catalog_id = doc.new_object_id();
        doc.objects.insert(resources_id, Object::Dictionary(resources));

        Self {
            doc,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            info: None,
        }
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(dictionary! {}, content.encode()?);
        Ok(self.doc.add_object(Object::Stream(stream)))
    }

    /// Appends a page to the page tree.
    pub fn write_page(&mut self, content_id: ObjectId, size: Size) -> ObjectId {
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), size.width.into(), size.height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => self.resources_id,
        };
        let page_id = self.doc.add_object(page_dict);
        self.page_ids.push(page_id);
        page_id
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self, compress: bool) -> Result<Vec<u8>, RenderError> {
        if self.page_ids.is_empty() {
            return Err(RenderError::Pdf("document has no pages".into()));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.doc.objects.insert(self.catalog_id, Object::Dictionary(catalog_dict));
        self.doc.trailer.set("Root", self.catalog_id);

        if let Some(info) = self.info.take() {
            let info_id = self.doc.add_object(info);
            self.doc.trailer.set("Info", info_id);
        }

        if compress {
            self.doc.compress();
        }

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
