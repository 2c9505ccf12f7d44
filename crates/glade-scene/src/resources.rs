//! Shared render resources and materials
//!
//! Texture and shader handles are owned by the scene in a single
//! [`SceneResources`] table and handed to each object when it is drawn.
//! Handles are opaque ids issued by the rendering backend.

use glade_core::Color;

/// Backend-issued texture id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Backend-issued shader program id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Read-only table of the textures and shaders a scene draws with
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneResources {
    pub grass: Option<TextureHandle>,
    pub road: Option<TextureHandle>,
    pub leaves: Option<TextureHandle>,
    pub trunk: Option<TextureHandle>,
    /// Vertex-colour program used by props
    pub prop_shader: Option<ShaderHandle>,
}

/// Surface description for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub texture: Option<TextureHandle>,
    pub shader: Option<ShaderHandle>,
    pub diffuse: Color,
    pub specular: Color,
    pub ambient: Color,
    pub shininess: f32,
    /// Whether fixed-function lighting applies (props light themselves)
    pub lit: bool,
}

impl Material {
    pub fn terrain(resources: &SceneResources) -> Self {
        Self {
            texture: resources.grass,
            shader: None,
            diffuse: Color::new(0.1, 1.0, 0.8, 1.0),
            specular: Color::WHITE,
            ambient: Color::new(0.1, 1.0, 0.8, 1.0),
            shininess: 10.0,
            lit: true,
        }
    }

    pub fn trunk(resources: &SceneResources) -> Self {
        Self {
            texture: resources.trunk,
            shader: None,
            diffuse: Color::new(0.5, 0.5, 0.5, 1.0),
            specular: Color::WHITE,
            ambient: Color::BLACK,
            shininess: 10.0,
            lit: true,
        }
    }

    pub fn foliage(resources: &SceneResources) -> Self {
        Self {
            texture: resources.leaves,
            shader: None,
            diffuse: Color::GREEN,
            specular: Color::WHITE,
            ambient: Color::GREEN,
            shininess: 10.0,
            lit: true,
        }
    }

    pub fn road(resources: &SceneResources) -> Self {
        Self {
            texture: resources.road,
            shader: None,
            diffuse: Color::BLACK,
            specular: Color::BLACK,
            ambient: Color::BLACK,
            shininess: 0.0,
            lit: true,
        }
    }

    pub fn prop(resources: &SceneResources) -> Self {
        Self {
            texture: None,
            shader: resources.prop_shader,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            ambient: Color::WHITE,
            shininess: 0.0,
            lit: false,
        }
    }

    pub fn avatar() -> Self {
        Self {
            texture: None,
            shader: None,
            diffuse: Color::new(0.6, 0.2, 0.2, 1.0),
            specular: Color::new(0.95, 0.8, 0.6, 0.2),
            ambient: Color::new(0.7, 0.3, 0.3, 1.0),
            shininess: 100.0,
            lit: true,
        }
    }
}
