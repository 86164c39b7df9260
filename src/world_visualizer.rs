use bevy::app::{App, Update};
use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_pixels::prelude::*;

use crate::render::{Raster, RenderFrame};

#[derive(Resource)]
struct RasterResource {
    raster: Raster,
}

/// A window showing a rasterized [`RenderFrame`]. Closes on escape.
pub struct WorldVisualizer {}

impl WorldVisualizer {
    fn draw_window(mut wrapper_query: Query<&mut PixelsWrapper>, raster: Res<RasterResource>) {
        let raster = &raster.raster;

        let Ok(mut wrapper) = wrapper_query.get_single_mut() else { return };
        if wrapper.pixels.resize_buffer(raster.width, raster.height).is_err() {
            return;
        }
        let frame = wrapper.pixels.frame_mut();
        if frame.len() == raster.pixels.len() {
            frame.copy_from_slice(&raster.pixels);
        }
    }

    /// Opens a `resolution x resolution` window with `pixels_per_unit` pixels per unit of
    /// hex size. Blocks until the window is closed.
    pub fn visualize(frame: &RenderFrame, resolution: usize, pixels_per_unit: f64) {
        let raster = frame.rasterize(pixels_per_unit);
        if raster.width == 0 || raster.height == 0 {
            return;
        }

        let mut resolution = WindowResolution::new(resolution as f32, resolution as f32);
        resolution.set_scale_factor_override(Some(1.0));

        let window_plugin = WindowPlugin {
            primary_window: Some(Window {
                title: "HEXMAP".into(),
                resolution,
                resizable: false,
                ..default()
            }),
            ..default()
        };

        App::new()
            .add_plugins((DefaultPlugins.set(window_plugin), PixelsPlugin::default()))
            .add_systems(Update, bevy::window::close_on_esc)
            .add_systems(Draw, Self::draw_window)
            .insert_resource(RasterResource { raster })
            .run();
    }
}
