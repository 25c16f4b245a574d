//! Layer arena.
//!
//! The snapshot owns its layers through nested `children` vectors, which is
//! fine for walking down but useless for walking up. The compositor needs a
//! layer's ancestors, so the tree is indexed once into a flat arena where each
//! entry borrows its layer and records its parent as an index.

use crate::model::{Document, Layer};

/// Index of a layer in a [`LayerTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

#[derive(Debug)]
struct Entry<'a> {
    layer: &'a Layer,
    parent: Option<LayerId>,
    children: Vec<LayerId>,
}

/// A read-only, parent-linked view over a document's layers.
#[derive(Debug)]
pub struct LayerTree<'a> {
    entries: Vec<Entry<'a>>,
    roots: Vec<LayerId>,
}

impl<'a> LayerTree<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self::from_layers(&document.layers)
    }

    pub fn from_layers(layers: &'a [Layer]) -> Self {
        let mut tree = LayerTree {
            entries: Vec::new(),
            roots: Vec::with_capacity(layers.len()),
        };
        for layer in layers {
            let id = tree.insert(layer, None);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, layer: &'a Layer, parent: Option<LayerId>) -> LayerId {
        let id = LayerId(self.entries.len());
        self.entries.push(Entry {
            layer,
            parent,
            children: Vec::with_capacity(layer.children().len()),
        });
        for child in layer.children() {
            let child_id = self.insert(child, Some(id));
            self.entries[id.0].children.push(child_id);
        }
        id
    }

    /// Top-level layers in stacking order.
    pub fn roots(&self) -> &[LayerId] {
        &self.roots
    }

    pub fn layer(&self, id: LayerId) -> &'a Layer {
        self.entries[id.0].layer
    }

    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.entries[id.0].parent
    }

    /// Direct children in stacking order.
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        &self.entries[id.0].children
    }

    /// The layer itself followed by each ancestor up to its top-level layer.
    pub fn ancestry(&self, id: LayerId) -> Ancestry<'_, 'a> {
        Ancestry {
            tree: self,
            next: Some(id),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Iterator over a layer and its ancestors, innermost first.
pub struct Ancestry<'t, 'a> {
    tree: &'t LayerTree<'a>,
    next: Option<LayerId>,
}

impl<'t, 'a> Iterator for Ancestry<'t, 'a> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
