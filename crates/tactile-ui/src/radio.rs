//! Radio buttons and the registry that keeps each group mutually exclusive.
//!
//! A `RadioGroups` handle is shared by every button that may ever join the
//! same group. Cloning the handle is cheap; all clones see the same registry.
//!
//! ```rust
//! use tactile_core::*;
//! use tactile_ui::*;
//!
//! let groups = RadioGroups::new();
//! let font = FixedAdvance::new(8.0, 16.0);
//! let small = RadioButton::text(&groups, (0.0, 0.0), "size", "Small").font(font);
//! let mut large = RadioButton::text(&groups, (0.0, 30.0), "size", "Large").font(font);
//!
//! large.handle_event(&InputEvent::mouse_down(5.0, 35.0));
//! assert!(large.handle_event(&InputEvent::mouse_up(5.0, 35.0)));
//! assert_eq!(groups.selected("size").unwrap(), "Large");
//! assert!(!small.value());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tactile_core::error::Result;
use tactile_core::*;
use tactile_text::Font;

use crate::button::resolve_or_blank;
use crate::checkbox::{ToggleImages, override_image};
use crate::clickable::PressTracker;
use crate::widget::{Callback, Widget, WidgetBase};

new_key_type! {
    pub struct RadioId;
}

struct Member {
    nickname: String,
    group: String,
    value: bool,
    enabled: bool,
}

#[derive(Default)]
struct Registry {
    members: SlotMap<RadioId, Member>,
    groups: HashMap<String, SmallVec<[RadioId; 8]>>,
}

/// Shared registry mapping group names to their radio buttons.
#[derive(Clone, Default)]
pub struct RadioGroups(Rc<RefCell<Registry>>);

impl RadioGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member, creating the group on first use.
    pub fn register(&self, group: &str, nickname: &str, value: bool) -> RadioId {
        let mut reg = self.0.borrow_mut();
        let id = reg.members.insert(Member {
            nickname: nickname.to_string(),
            group: group.to_string(),
            value,
            enabled: true,
        });
        reg.groups.entry(group.to_string()).or_default().push(id);
        log::trace!("radio `{nickname}` joined group `{group}`");
        id
    }

    /// Removes one member; the group itself stays, even when empty.
    pub fn unregister(&self, id: RadioId) {
        let mut reg = self.0.borrow_mut();
        if let Some(m) = reg.members.remove(id) {
            if let Some(ids) = reg.groups.get_mut(&m.group) {
                ids.retain(|other| *other != id);
            }
        }
    }

    /// Turns every member of `id`'s group off, then `id` on.
    pub fn select(&self, id: RadioId) {
        let mut reg = self.0.borrow_mut();
        let Some(group) = reg.members.get(id).map(|m| m.group.clone()) else {
            return;
        };
        match reg.groups.get(&group).cloned() {
            Some(ids) => {
                for other in ids {
                    if let Some(m) = reg.members.get_mut(other) {
                        m.value = false;
                    }
                }
            }
            None => log::warn!("selecting a radio button of removed group `{group}`"),
        }
        if let Some(m) = reg.members.get_mut(id) {
            m.value = true;
            log::debug!("radio group `{group}` selected `{}`", m.nickname);
        }
    }

    /// Nickname of the selected member.
    pub fn selected(&self, group: &str) -> Result<String> {
        let reg = self.0.borrow();
        let ids = reg
            .groups
            .get(group)
            .ok_or_else(|| WidgetError::UnknownGroup(group.to_string()))?;
        ids.iter()
            .filter_map(|id| reg.members.get(*id))
            .find(|m| m.value)
            .map(|m| m.nickname.clone())
            .ok_or_else(|| WidgetError::NoSelection(group.to_string()))
    }

    pub fn enable_group(&self, group: &str) -> Result<()> {
        self.set_group_enabled(group, true)
    }

    pub fn disable_group(&self, group: &str) -> Result<()> {
        self.set_group_enabled(group, false)
    }

    fn set_group_enabled(&self, group: &str, enabled: bool) -> Result<()> {
        let mut reg = self.0.borrow_mut();
        let ids = reg
            .groups
            .get(group)
            .cloned()
            .ok_or_else(|| WidgetError::UnknownGroup(group.to_string()))?;
        for id in ids {
            if let Some(m) = reg.members.get_mut(id) {
                m.enabled = enabled;
            }
        }
        Ok(())
    }

    /// Forgets a group. Its buttons keep working on their own but no longer
    /// exclude each other.
    pub fn remove_group(&self, group: &str) -> Result<()> {
        match self.0.borrow_mut().groups.remove(group) {
            Some(_) => {
                log::debug!("radio group `{group}` removed");
                Ok(())
            }
            None => Err(WidgetError::UnknownGroup(group.to_string())),
        }
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.0.borrow().groups.contains_key(group)
    }

    /// Member nicknames in registration order.
    pub fn members(&self, group: &str) -> Result<Vec<String>> {
        let reg = self.0.borrow();
        let ids = reg
            .groups
            .get(group)
            .ok_or_else(|| WidgetError::UnknownGroup(group.to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|id| reg.members.get(*id))
            .map(|m| m.nickname.clone())
            .collect())
    }

    pub fn value(&self, id: RadioId) -> bool {
        self.0.borrow().members.get(id).is_some_and(|m| m.value)
    }

    pub fn set_value(&self, id: RadioId, value: bool) {
        if let Some(m) = self.0.borrow_mut().members.get_mut(id) {
            m.value = value;
        }
    }

    pub fn is_enabled(&self, id: RadioId) -> bool {
        self.0.borrow().members.get(id).is_some_and(|m| m.enabled)
    }

    pub fn set_enabled(&self, id: RadioId, enabled: bool) {
        if let Some(m) = self.0.borrow_mut().members.get_mut(id) {
            m.enabled = enabled;
        }
    }

    fn set_nickname(&self, id: RadioId, nickname: &str) {
        if let Some(m) = self.0.borrow_mut().members.get_mut(id) {
            m.nickname = nickname.to_string();
        }
    }
}

struct TextLook {
    label: String,
    font: Rc<dyn TextMeasure>,
    diameter: f32,
    text_offset: f32,
    text_color: Color,
}

enum RadioLook {
    Text(TextLook),
    Images(ToggleImages),
}

/// One member of a radio group. Value and enabled state live in the
/// registry so the whole group can be updated from any member.
pub struct RadioButton {
    base: WidgetBase,
    groups: RadioGroups,
    id: RadioId,
    group: String,
    tracker: PressTracker,
    look: RadioLook,
    sound: Option<SoundHandle>,
    on_click: Option<Callback>,
}

impl RadioButton {
    /// A drawn circle with a label; the label doubles as the nickname.
    pub fn text(
        groups: &RadioGroups,
        loc: impl Into<Vec2>,
        group: &str,
        label: impl Into<String>,
    ) -> Self {
        let t = theme();
        let label = label.into();
        let look = RadioLook::Text(TextLook {
            label: label.clone(),
            font: Rc::new(Font::system(t.font_size)),
            diameter: t.radio_diameter,
            text_offset: t.radio_text_offset,
            text_color: t.text,
        });
        let mut r = Self::with_look(groups, loc.into(), group, &label, look);
        r.relayout();
        r
    }

    pub fn custom(
        groups: &RadioGroups,
        loc: impl Into<Vec2>,
        group: &str,
        on: impl Into<ImageSource>,
        off: impl Into<ImageSource>,
    ) -> Result<Self> {
        let images = ToggleImages::new(resolve_or_blank(on.into())?, resolve_or_blank(off.into())?);
        let size = images.on.size();
        let mut r = Self::with_look(groups, loc.into(), group, "", RadioLook::Images(images));
        r.base.set_size(size);
        Ok(r)
    }

    fn with_look(
        groups: &RadioGroups,
        loc: Vec2,
        group: &str,
        nickname: &str,
        look: RadioLook,
    ) -> Self {
        let mut base = WidgetBase::new(loc, Size::ZERO);
        base.nickname = nickname.to_string();
        Self {
            id: groups.register(group, nickname, false),
            groups: groups.clone(),
            group: group.to_string(),
            base,
            tracker: PressTracker::new(),
            look,
            sound: None,
            on_click: None,
        }
    }

    /// Initial value. Does not clear the other members.
    pub fn checked(self, value: bool) -> Self {
        self.groups.set_value(self.id, value);
        self
    }

    pub fn nickname(mut self, name: impl Into<String>) -> Self {
        self.base.nickname = name.into();
        self.groups.set_nickname(self.id, &self.base.nickname);
        self
    }

    /// Called once per selection, after the group has been updated.
    pub fn on_click(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn sound(mut self, sound: SoundHandle) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn font(mut self, measure: impl TextMeasure + 'static) -> Self {
        if let RadioLook::Text(look) = &mut self.look {
            look.font = Rc::new(measure);
        }
        self.relayout();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        if let RadioLook::Text(look) = &mut self.look {
            look.text_color = color;
        }
        self
    }

    pub fn images(
        mut self,
        on_down: Option<ImageSource>,
        off_down: Option<ImageSource>,
        on_disabled: Option<ImageSource>,
        off_disabled: Option<ImageSource>,
    ) -> Result<Self> {
        if let RadioLook::Images(imgs) = &mut self.look {
            override_image(&mut imgs.on_down, on_down)?;
            override_image(&mut imgs.off_down, off_down)?;
            override_image(&mut imgs.on_disabled, on_disabled)?;
            override_image(&mut imgs.off_disabled, off_disabled)?;
        }
        Ok(self)
    }

    pub fn id(&self) -> RadioId {
        self.id
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn value(&self) -> bool {
        self.groups.value(self.id)
    }

    /// Sets only this button; use `select` to keep the group exclusive.
    pub fn set_value(&mut self, value: bool) {
        self.groups.set_value(self.id, value);
    }

    pub fn select(&mut self) {
        self.groups.select(self.id);
    }

    /// Nickname of the selected member of this button's group.
    pub fn selected(&self) -> Result<String> {
        self.groups.selected(&self.group)
    }

    pub fn enable_group(&mut self) {
        if self.groups.enable_group(&self.group).is_err() {
            log::warn!("group `{}` was removed; enabling only `{}`", self.group, self.base.nickname);
            self.groups.set_enabled(self.id, true);
        }
    }

    pub fn disable_group(&mut self) {
        if self.groups.disable_group(&self.group).is_err() {
            log::warn!("group `{}` was removed; disabling only `{}`", self.group, self.base.nickname);
            self.groups.set_enabled(self.id, false);
        }
    }

    fn relayout(&mut self) {
        if let RadioLook::Text(look) = &self.look {
            let size = Size::new(
                look.font.advance(&look.label) + look.text_offset,
                look.diameter.max(look.font.line_height()),
            );
            self.base.set_size(size);
        }
    }
}

impl Drop for RadioButton {
    fn drop(&mut self) {
        self.groups.unregister(self.id);
    }
}

impl Widget for RadioButton {
    fn base(&self) -> &WidgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn enable(&mut self) {
        self.groups.set_enabled(self.id, true);
    }
    fn disable(&mut self) {
        self.groups.set_enabled(self.id, false);
    }
    fn is_enabled(&self) -> bool {
        self.groups.is_enabled(self.id)
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.base.visible || !self.is_enabled() {
            return false;
        }
        let Some(p) = event.as_pointer() else {
            return false;
        };
        if !self.tracker.handle(&self.base.rect, p) {
            return false;
        }
        self.groups.select(self.id);
        if let Some(s) = &self.sound {
            s.play();
        }
        if let Some(cb) = &self.on_click {
            cb(&self.base.nickname);
        }
        true
    }

    fn draw(&self, scene: &mut Scene) {
        if !self.base.visible {
            return;
        }
        let enabled = self.is_enabled();
        let value = self.value();
        let pressed = self.tracker.shows_pressed();
        match &self.look {
            RadioLook::Images(imgs) => {
                scene.image(imgs.pick(value, enabled, pressed), self.base.loc);
            }
            RadioLook::Text(look) => {
                let t = theme();
                let loc = self.base.loc;
                let d = look.diameter;
                let circle = Rect::new(loc.x, loc.y, d, d);
                let (fill, edge) = match (enabled, pressed) {
                    (false, _) => (Color::TRANSPARENT, t.disabled_text),
                    (true, true) => (t.inside_down, t.edge),
                    (true, false) => (t.inside, t.edge),
                };
                scene.push(SceneNode::Rect {
                    rect: circle,
                    color: fill,
                    radius: d / 2.0,
                });
                scene.push(SceneNode::Border {
                    rect: circle,
                    color: edge,
                    width: 2.0,
                    radius: d / 2.0,
                });
                // The pressed look hides the dot.
                if value && !(enabled && pressed) {
                    let dot = Rect::new(0.0, 0.0, 6.0, 6.0).with_center(circle.center());
                    scene.push(SceneNode::Rect {
                        rect: dot,
                        color: edge,
                        radius: 3.0,
                    });
                }
                let w = look.font.advance(&look.label);
                scene.push(SceneNode::Text {
                    rect: Rect::new(loc.x + look.text_offset, loc.y, w, look.font.line_height()),
                    text: look.label.clone(),
                    color: if enabled {
                        look.text_color
                    } else {
                        t.disabled_text
                    },
                    size: look.font.font_size(),
                    family: look.font.family().map(str::to_string),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn button(groups: &RadioGroups, y: f32, label: &str) -> RadioButton {
        RadioButton::text(groups, (0.0, y), "g", label).font(FixedAdvance::new(8.0, 16.0))
    }

    fn click(r: &mut RadioButton) -> bool {
        let c = r.rect().center();
        r.handle_event(&InputEvent::mouse_down(c.x, c.y));
        r.handle_event(&InputEvent::mouse_up(c.x, c.y))
    }

    #[test]
    fn selecting_one_clears_the_rest() {
        init_logs();
        let groups = RadioGroups::new();
        let mut a = button(&groups, 0.0, "A").checked(true);
        let mut b = button(&groups, 30.0, "B");
        let c = button(&groups, 60.0, "C");

        assert!(click(&mut b));
        assert_eq!(groups.selected("g").unwrap(), "B");
        assert_eq!(b.selected().unwrap(), "B");
        assert!(!a.value() && b.value() && !c.value());

        assert!(click(&mut a));
        assert_eq!(c.selected().unwrap(), "A");
        assert!(!b.value());
    }

    #[test]
    fn callback_runs_once_per_click_after_selection() {
        let groups = RadioGroups::new();
        let calls = Rc::new(Cell::new(0));
        let seen_value = Rc::new(Cell::new(false));
        let (c, g) = (calls.clone(), groups.clone());
        let sv = seen_value.clone();
        let mut a = button(&groups, 0.0, "A").on_click(move |name| {
            c.set(c.get() + 1);
            sv.set(g.selected("g").map(|s| s == name).unwrap_or(false));
        });
        assert!(click(&mut a));
        assert_eq!(calls.get(), 1);
        assert!(seen_value.get());
    }

    #[test]
    fn no_selection_and_unknown_group_errors() {
        let groups = RadioGroups::new();
        let _a = button(&groups, 0.0, "A");
        assert!(matches!(groups.selected("g"), Err(WidgetError::NoSelection(g)) if g == "g"));
        assert!(matches!(groups.selected("nope"), Err(WidgetError::UnknownGroup(_))));
        assert!(matches!(groups.remove_group("nope"), Err(WidgetError::UnknownGroup(_))));
    }

    #[test]
    fn group_enable_disable() {
        let groups = RadioGroups::new();
        let mut a = button(&groups, 0.0, "A");
        let mut b = button(&groups, 30.0, "B");

        a.disable_group();
        assert!(!a.is_enabled() && !b.is_enabled());
        assert!(!click(&mut b));

        groups.enable_group("g").unwrap();
        assert!(a.is_enabled() && b.is_enabled());

        b.disable();
        assert!(a.is_enabled() && !b.is_enabled());
    }

    #[test]
    fn removed_group_is_forgotten() {
        let groups = RadioGroups::new();
        let mut a = button(&groups, 0.0, "A");
        assert_eq!(groups.members("g").unwrap(), vec!["A".to_string()]);
        groups.remove_group("g").unwrap();
        assert!(!groups.contains_group("g"));
        assert!(matches!(groups.remove_group("g"), Err(WidgetError::UnknownGroup(_))));

        // The button still works on its own.
        assert!(click(&mut a));
        assert!(a.value());
        a.disable_group();
        assert!(!a.is_enabled());
    }

    #[test]
    fn dropping_a_button_leaves_the_group() {
        let groups = RadioGroups::new();
        let _a = button(&groups, 0.0, "A");
        {
            let _b = button(&groups, 30.0, "B").nickname("bee");
            assert_eq!(groups.members("g").unwrap(), vec!["A", "bee"]);
        }
        assert_eq!(groups.members("g").unwrap(), vec!["A"]);
    }

    #[test]
    fn groups_are_independent() {
        let groups = RadioGroups::new();
        let mut a = button(&groups, 0.0, "A");
        let mut x = RadioButton::text(&groups, (200.0, 0.0), "other", "X")
            .font(FixedAdvance::new(8.0, 16.0));
        click(&mut a);
        click(&mut x);
        assert!(a.value() && x.value());
        assert_eq!(groups.selected("other").unwrap(), "X");
    }

    #[test]
    fn selected_dot_is_drawn() {
        let groups = RadioGroups::new();
        let mut a = button(&groups, 0.0, "A");
        let rounded = |r: &RadioButton| {
            let mut scene = Scene::new();
            r.draw(&mut scene);
            scene
                .nodes
                .iter()
                .filter(|n| matches!(n, SceneNode::Rect { .. }))
                .count()
        };
        assert_eq!(rounded(&a), 1);
        a.select();
        assert_eq!(rounded(&a), 2);
    }
}
