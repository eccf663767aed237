use log::info;

use crate::error::{EditorError, EditorResult};
use crate::layer::{Layer, LayerId};
use crate::renderer::CANVAS_BASE;

/// The ordered sequence of layers (paint order, bottom to top) plus the
/// active-layer index.
///
/// Invariants enforced here: the stack is never empty, and
/// `active_index` always addresses an existing layer. Out-of-range indices
/// from callers are rejected with [`EditorError::OutOfRange`]; deleting the
/// sole remaining layer with [`EditorError::InvalidOperation`].
pub struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active_index: usize,
}

impl LayerStack {
    /// A new stack holding the opaque-white background layer.
    pub fn new(width: u32, height: u32) -> Self {
        let background = Layer::new("Background", width, height, Some(CANVAS_BASE));
        Self {
            width,
            height,
            layers: vec![background],
            active_index: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        // the constructor and the delete guard keep the stack non-empty
        false
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active_index]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active_index]
    }

    /// Appends a new transparent layer on top and makes it active. With no
    /// name given, layers are numbered "Layer 2", "Layer 3", …
    pub fn add_layer(&mut self, name: Option<&str>) -> LayerId {
        let default_name;
        let name = match name {
            Some(name) => name,
            None => {
                default_name = format!("Layer {}", self.layers.len() + 1);
                &default_name
            }
        };
        let layer = Layer::new(name, self.width, self.height, None);
        let id = layer.id();
        info!("added layer {id} ({name})");
        self.layers.push(layer);
        self.active_index = self.layers.len() - 1;
        id
    }

    /// Removes a layer and re-clamps the active index. The last remaining
    /// layer cannot be deleted.
    pub fn delete_layer(&mut self, index: usize) -> EditorResult<()> {
        self.check_index(index)?;
        if self.layers.len() == 1 {
            return Err(EditorError::InvalidOperation);
        }
        let removed = self.layers.remove(index);
        info!("deleted layer {} ({})", removed.id(), removed.name());
        if self.active_index >= self.layers.len() {
            self.active_index = self.layers.len() - 1;
        }
        Ok(())
    }

    /// Makes the layer at `index` the target of subsequent edits.
    pub fn select_layer(&mut self, index: usize) -> EditorResult<()> {
        self.check_index(index)?;
        self.active_index = index;
        Ok(())
    }

    pub fn set_visibility(&mut self, index: usize, visible: bool) -> EditorResult<()> {
        self.check_index(index)?;
        self.layers[index].set_visible(visible);
        Ok(())
    }

    /// Sets a layer's opacity; out-of-range values are clamped into [0, 1].
    pub fn set_opacity(&mut self, index: usize, opacity: f32) -> EditorResult<()> {
        self.check_index(index)?;
        self.layers[index].set_opacity(opacity);
        Ok(())
    }

    fn check_index(&self, index: usize) -> EditorResult<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(EditorError::OutOfRange {
                index,
                count: self.layers.len(),
            })
        }
    }
}
