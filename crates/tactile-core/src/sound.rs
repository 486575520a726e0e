use std::rc::Rc;

/// Something playable, supplied by the host's audio layer.
pub trait Sound {
    fn play(&self);
}

pub type SoundHandle = Rc<dyn Sound>;
