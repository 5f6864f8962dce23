//! Document serialization
//!
//! Shapes are written as the attribute maps they produce through `accept`.
//! Loading creates each basic shape from its type with default geometry,
//! then applies every stored attribute through the same checked edit path
//! the editor uses.

use crate::{DocumentFile, FileHeader, Result, StoreError};
use doc_model::{
    AttributeMap, BasicShape, Decoration, DocModelError, Document, Drawable, OrderingStrategy, Point, Shape,
    ShapeKind,
};

/// Build the file contents for a document in the given ordering
pub fn to_file(document: &Document, ordering: OrderingStrategy) -> DocumentFile {
    let shapes = ordering
        .order(document)
        .into_iter()
        .flat_map(Shape::accept_chain)
        .collect();
    DocumentFile {
        header: FileHeader::new(document.name()),
        ordering,
        shapes,
    }
}

/// Serialize a document to JSON
pub fn serialize(document: &Document, ordering: OrderingStrategy) -> Result<String> {
    let json = serde_json::to_string_pretty(&to_file(document, ordering))?;
    Ok(json)
}

/// Deserialize a document from JSON
pub fn deserialize(json: &str) -> Result<Document> {
    let file: DocumentFile = serde_json::from_str(json)?;

    if !file.header.is_valid() {
        return Err(StoreError::InvalidFormat(format!(
            "Invalid or unsupported format version: {}",
            file.header.version
        )));
    }

    from_file(file)
}

/// Rebuild a document from file contents
pub fn from_file(file: DocumentFile) -> Result<Document> {
    let mut shapes: Vec<Shape> = Vec::new();

    for map in &file.shapes {
        let name = map
            .name()
            .ok_or_else(|| StoreError::InvalidFormat("shape without a name".to_string()))?;

        match map.wraps() {
            None => shapes.push(build_basic(name, map)?),
            Some(wrapped) => {
                let index = shapes
                    .iter()
                    .position(|s| s.unique_name() == wrapped)
                    .ok_or_else(|| {
                        StoreError::InvalidFormat(format!(
                            "'{}' wraps unknown shape '{}'",
                            name, wrapped
                        ))
                    })?;
                let inner = shapes.remove(index);
                shapes.insert(index, build_decorator(name, inner, map)?);
            }
        }
    }

    let mut document = Document::new(file.header.document_name);
    for shape in shapes {
        document.add(shape)?;
    }
    tracing::debug!(
        "Loaded '{}' with {} shapes",
        document.name(),
        document.len()
    );
    Ok(document)
}

fn type_of<'m>(name: &str, map: &'m AttributeMap) -> Result<&'m str> {
    map.type_name()
        .ok_or_else(|| {
            DocModelError::MissingAttribute {
                shape: name.to_string(),
                attribute: AttributeMap::TYPE.to_string(),
            }
            .into()
        })
}

fn apply_attributes(shape: &mut Shape, map: &AttributeMap) -> Result<()> {
    for (attribute, value) in map.editable() {
        shape.set_attribute(attribute, value)?;
    }
    Ok(())
}

fn build_basic(name: &str, map: &AttributeMap) -> Result<Shape> {
    let type_name = type_of(name, map)?;
    let kind = ShapeKind::from_type_name(type_name).ok_or_else(|| {
        StoreError::InvalidFormat(format!("'{}' has unknown type '{}'", name, type_name))
    })?;
    let mut shape = Shape::from(BasicShape::new(name, kind, Point::ORIGIN));
    apply_attributes(&mut shape, map)?;
    Ok(shape)
}

fn build_decorator(name: &str, inner: Shape, map: &AttributeMap) -> Result<Shape> {
    let type_name = type_of(name, map)?;
    let decoration = Decoration::from_type_name(type_name).ok_or_else(|| {
        StoreError::InvalidFormat(format!(
            "'{}' has unknown decoration '{}'",
            name, type_name
        ))
    })?;
    let mut shape = inner.decorate(decoration);
    if shape.unique_name() != name {
        return Err(StoreError::InvalidFormat(format!(
            "decorator '{}' should be named '{}'",
            name,
            shape.unique_name()
        )));
    }
    apply_attributes(&mut shape, map)?;
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{AttributeValue, ShapeColor, TexturePattern};
    use render_model::NullSurface;

    fn sample() -> Document {
        let mut surface = NullSurface;
        let mut doc = Document::new("sample");
        doc.add(Shape::rectangle("r", Point::new(10.0, 40.0), 20.0, 10.0)).unwrap();
        doc.add(Shape::polygon("p", Point::new(5.0, 5.0), 5, 8.0)).unwrap();
        doc.add(Shape::text("t", Point::new(1.0, 2.0), "hi there", 10.0)).unwrap();
        doc.find_by_name_mut("r")
            .unwrap()
            .set_attribute("fill", &ShapeColor::RED.into())
            .unwrap();
        doc.decorate("r", Decoration::texture(TexturePattern::Cross), &mut surface)
            .unwrap();
        doc.decorate("r", Decoration::shadow(), &mut surface).unwrap();
        doc
    }

    #[test]
    fn test_round_trip_keeps_chains_and_attributes() {
        let doc = sample();
        let json = serialize(&doc, OrderingStrategy::Creation).unwrap();
        let loaded = deserialize(&json).unwrap();

        assert_eq!(loaded.name(), "sample");
        assert_eq!(loaded.snapshot(), doc.snapshot());
        assert_eq!(
            loaded.find_by_name("r").unwrap().unique_name(),
            "r+texture+shadow"
        );
    }

    #[test]
    fn test_decorator_maps_reference_wrapped_shape() {
        let file = to_file(&sample(), OrderingStrategy::Creation);
        let names: Vec<&str> = file.shapes.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["r", "r+texture", "r+texture+shadow", "p", "t"]);
        assert_eq!(file.shapes[1].wraps(), Some("r"));
        assert_eq!(file.shapes[2].wraps(), Some("r+texture"));
        assert!(!file.shapes[2].contains_key("fill"));
    }

    #[test]
    fn test_spatial_ordering_is_written() {
        let file = to_file(&sample(), OrderingStrategy::Spatial);
        let tops: Vec<&str> = file
            .shapes
            .iter()
            .filter(|m| m.wraps().is_none())
            .filter_map(|m| m.name())
            .collect();
        assert_eq!(tops, vec!["t", "p", "r"]);
    }

    #[test]
    fn test_dangling_wraps_is_rejected() {
        let mut file = to_file(&sample(), OrderingStrategy::Creation);
        file.shapes.remove(0);
        let err = from_file(file).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat(_)));
    }

    #[test]
    fn test_bad_attribute_is_rejected() {
        let mut file = to_file(&sample(), OrderingStrategy::Creation);
        file.shapes[3].insert("sides", AttributeValue::Number(1.0));
        assert!(matches!(
            from_file(file),
            Err(StoreError::DocModel(doc_model::DocModelError::AttributeCast { .. }))
        ));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let mut file = to_file(&sample(), OrderingStrategy::Creation);
        let mut untyped = AttributeMap::new();
        untyped.insert(AttributeMap::NAME, "ghost");
        file.shapes.push(untyped);
        assert!(matches!(
            from_file(file),
            Err(StoreError::DocModel(DocModelError::MissingAttribute { ref shape, .. })) if shape == "ghost"
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut file = to_file(&sample(), OrderingStrategy::Creation);
        file.header.version = 99;
        let json = serde_json::to_string(&file).unwrap();
        assert!(matches!(
            deserialize(&json),
            Err(StoreError::InvalidFormat(_))
        ));
    }
}
