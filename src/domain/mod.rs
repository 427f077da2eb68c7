// Domain layer: catalog model, ports implemented by adapters, and the registration service.

pub mod model;
pub mod ports;

pub mod services;
