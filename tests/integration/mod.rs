mod path_generation;
mod probe_fallback;
