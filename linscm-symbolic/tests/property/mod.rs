mod inverse_properties;
