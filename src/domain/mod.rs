// Domain layer: CV data model, ports, and the pure services that turn the data into table rows and template text.

pub mod model;
pub mod ports;

pub mod services;
