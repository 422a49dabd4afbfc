mod motion_split;
mod pipeline;
mod polygon_split;
mod random_polygons;
