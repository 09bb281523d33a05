mod covariance_properties;
mod mask_properties;
