mod submit_packages;
