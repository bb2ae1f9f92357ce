use crate::engine::command::CommandKind;
use crate::engine::registry::{Registry, Resources};
use crate::foundation::error::LedError;
use crate::renderers::animation::{self, AnimationRenderer, Field};
use crate::renderers::clock::{AnalogClock, DigitalClock};
use crate::renderers::sequence::SequenceRenderer;
use crate::renderers::still::ImageRenderer;
use crate::renderers::Renderer;

/// Registry with every built-in renderer.
///
/// - `image`, `gif` and `gif-once` accept any valid asset name and load it on render.
/// - `dashboard`: `clock`, `digital-clock`.
/// - `animation`: see [`animation::NAMES`].
/// - `playground`: any name, all resolving to the marble shader.
pub fn default_registry(resources: Resources) -> Registry {
    let mut registry = Registry::new(resources);

    registry
        .register_fallback(CommandKind::Image, |res, name| {
            Ok(Box::new(ImageRenderer::new(res.assets.png_path(name)?)) as Box<dyn Renderer>)
        })
        .register_fallback(CommandKind::Gif, |res, name| {
            Ok(Box::new(SequenceRenderer::looping(res.assets.gif_path(name)?)) as Box<dyn Renderer>)
        })
        .register_fallback(CommandKind::GifOnce, |res, name| {
            Ok(Box::new(SequenceRenderer::once(res.assets.gif_path(name)?)) as Box<dyn Renderer>)
        });

    registry
        .register(CommandKind::Dashboard, "clock", |_, _| {
            Ok(Box::new(AnimationRenderer::new(AnalogClock)) as Box<dyn Renderer>)
        })
        .register(CommandKind::Dashboard, "digital-clock", |res, _| {
            Ok(Box::new(DigitalClock::new(res.font.clone())) as Box<dyn Renderer>)
        });

    for name in animation::NAMES {
        registry.register(CommandKind::Animation, name, |_, name| {
            animation::by_name(name)
                .ok_or_else(|| LedError::resolution(format!("no animation named '{name}'")))
        });
    }

    registry.register_fallback(CommandKind::Playground, |_, _| {
        Ok(Box::new(AnimationRenderer::new(Field(animation::marble))) as Box<dyn Renderer>)
    });

    registry
}

#[cfg(test)]
#[path = "../../tests/unit/renderers/catalog.rs"]
mod tests;
