mod content;
mod node;

pub use content::Content;
pub use node::{split_classes, Element, TEXT_TAG};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    find_first_mut(root, &|element: &Element| element.id == id)
}

/// First element in document order matching `pred`, mutably.
pub fn find_first_mut<'a, F>(root: &'a mut Element, pred: &F) -> Option<&'a mut Element>
where
    F: Fn(&Element) -> bool,
{
    if pred(root) {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children.iter_mut() {
            if let Some(found) = find_first_mut(child, pred) {
                return Some(found);
            }
        }
    }

    None
}

/// Every element in the tree, root first, in document order.
pub fn descendants(root: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    out.push(element);
    if let Content::Children(children) = &element.content {
        for child in children {
            collect(child, out);
        }
    }
}

/// Visit every element in document order.
pub fn for_each_mut<F>(root: &mut Element, f: &mut F)
where
    F: FnMut(&mut Element),
{
    f(root);
    if let Content::Children(children) = &mut root.content {
        for child in children.iter_mut() {
            for_each_mut(child, f);
        }
    }
}

/// All elements carrying `class`, in document order.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    descendants(root)
        .into_iter()
        .filter(|element| element.has_class(class))
        .collect()
}

/// First element whose `name` attribute equals `name` (form fields).
pub fn find_by_name<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    descendants(root)
        .into_iter()
        .find(|element| element.get_attr("name") == Some(name))
}

pub fn find_by_name_mut<'a>(root: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    find_first_mut(root, &|element: &Element| element.get_attr("name") == Some(name))
}
