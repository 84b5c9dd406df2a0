use mesh_core::{CoordinateSpace, MeshConfig, SeedPlacement};
use mesh_shared::{MeshSettings, SeedSetting, SpaceSetting};

/// Build an engine config from host settings, starting from the defaults of
/// the requested coordinate space.
pub fn config_from_settings(settings: &MeshSettings) -> MeshConfig {
    let space = match settings.space {
        SpaceSetting::Pixels => CoordinateSpace::DevicePixels,
        SpaceSetting::Normalized => CoordinateSpace::Normalized,
    };
    let mut config = MeshConfig::for_space(space);

    config.seed = match settings.seed {
        SeedSetting::Center => SeedPlacement::Center,
        SeedSetting::Uniform => SeedPlacement::Uniform,
    };
    if let Some(count) = settings.node_count {
        config.node_count = count;
    }

    let physics = &mut config.physics;
    if let Some(v) = settings.min_speed {
        physics.min_speed = v;
    }
    if let Some(v) = settings.max_speed {
        physics.max_speed = v;
    }
    if let Some(v) = settings.mouse_radius {
        physics.mouse_radius = v;
    }
    if let Some(v) = settings.damping {
        physics.damping = v;
    }
    if let Some(v) = settings.node_radius {
        physics.node_radius = v;
    }

    let style = &mut config.style;
    if let Some(color) = &settings.background {
        style.background = color.clone();
    }
    if let Some(color) = &settings.stroke {
        style.stroke = color.clone();
    }
    if let Some(v) = settings.line_width {
        style.line_width = v;
    }
    if let Some(v) = settings.draw_nodes {
        style.draw_nodes = v;
    }
    if let Some(v) = settings.disc_radius {
        style.disc_radius = v;
    }

    config
}
