mod gain_properties;
