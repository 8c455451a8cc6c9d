//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! The parsed `roxmltree::Document` owns every node; callers that need to
//! keep a node around past a borrow store its `NodeId` and resolve it again
//! with `Document::get_node`.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Tag name without namespace (e.g., "rede" not "{ns}rede")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use plenar_extractor::xml::get_tag_name;
///
/// let xml = r#"<sitzungsverlauf><rede id="ID1"/></sitzungsverlauf>"#;
/// let doc = Document::parse(xml).unwrap();
/// let rede = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(rede), "rede");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
///
/// # Arguments
/// * `node` - XML node
/// * `tag` - Expected tag name
///
/// # Returns
/// `true` if `node` is an element named `tag`
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use plenar_extractor::xml::find_child;
///
/// let xml = r#"<ivz-block><ivz-block-titel>TOP 1:</ivz-block-titel></ivz-block>"#;
/// let doc = Document::parse(xml).unwrap();
/// let block = doc.root_element();
///
/// assert!(find_child(block, "ivz-block-titel").is_some());
/// assert!(find_child(block, "ivz-eintrag").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find the first descendant element (excluding `node` itself) with the given tag name.
///
/// # Arguments
/// * `node` - Node whose subtree is searched
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching descendant in document order, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use plenar_extractor::xml::find_descendant;
///
/// let xml = r#"<rede><p><redner><name><vorname>Anna</vorname></name></redner></p></rede>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let vorname = find_descendant(doc.root_element(), "vorname").unwrap();
/// assert_eq!(vorname.text(), Some("Anna"));
/// ```
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| has_tag(*n, tag))
}

/// Find all descendant elements (excluding `node` itself) with the given tag name.
///
/// # Arguments
/// * `node` - Node whose subtree is searched
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching descendants in document order
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| has_tag(*n, tag))
}

/// Get all element children of a node.
///
/// # Arguments
/// * `node` - Parent node
///
/// # Returns
/// Iterator over child elements (excludes text nodes, comments and processing instructions)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the text that precedes the first child element, untrimmed.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Leading text of `node`, or `None` when it starts with a child element or is empty
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use plenar_extractor::xml::direct_text;
///
/// let doc = Document::parse("<p>Guten Tag <b>alle</b>.</p>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), Some("Guten Tag "));
///
/// let doc = Document::parse("<p><redner/>Anna Beispiel (SPD):</p>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), None);
/// ```
pub fn direct_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}

/// Get the text content of a node, trimmed.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Trimmed leading text, or an empty string if the node has no leading text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
///
/// # Arguments
/// * `node` - XML node
/// * `name` - Attribute name
///
/// # Returns
/// Attribute value, or `None` if not present
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}
