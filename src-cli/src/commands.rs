//! Parsing of prompt lines into editor requests

use doc_model::{
    AttributeValue, Decoration, OrderingStrategy, Point, Shape, TexturePattern, ZOrderOperation,
    MAX_POLYGON_SIDES,
};
use edit_engine::{LayerTarget, Motion};
use std::path::PathBuf;

/// One parsed prompt line
#[derive(Debug, Clone)]
pub enum Request {
    NewWindow(String),
    SwitchWindow(String),
    ListWindows,
    Create(Shape),
    Move { name: String, motion: Motion },
    Edit { name: String, attribute: String, value: AttributeValue },
    Decorate { name: String, decoration: Decoration },
    Undecorate(String),
    Delete(String),
    Layer { name: String, target: LayerTarget },
    Select { top_left: Point, bottom_right: Point },
    Deselect,
    Paste(Point),
    Undo,
    Redo,
    Depth(usize),
    Order(OrderingStrategy),
    List,
    Show(String),
    Help(Option<String>),
    Save(PathBuf),
    Load(PathBuf),
    Quit,
}

pub const USAGE: &str = "\
Windows:
  new <window>                      open a window and switch to it
  switch <window>                   make a window current
  windows                           list open windows
Shapes:
  rect <name> <x> <y> [w h]
  ellipse <name> <x> <y> [rx ry]
  line <name> <x> <y> [dx dy]
  polygon <name> <x> <y> [sides radius]
  text <name> <x> <y> <text...>
  move <name> <dx> <dy>             translate a shape
  moveto <name> <x> <y>             place a shape's center
  set <name> <attribute> <value>    edit an attribute
  texture <name> [hatch|cross|dots] add a texture overlay
  shadow <name>                     add a drop shadow
  undecorate <name>                 remove the outermost decoration
  delete <name>
Layers:
  front|back|forward|backward <name>
  layer <name> <index>
Selection:
  select <x1> <y1> <x2> <y2>        capture shapes whose center is inside
  deselect
  paste <x> <y>                     paste the selection at a new top-left corner
History:
  undo | redo | depth <n>
Session:
  order creation|spatial            ordering used by list and save
  list | show <name> | help [name]
  save <path> | load <path> | quit";

fn number(word: Option<&str>, what: &str) -> Result<f64, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    word.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{}' is not a valid {}", word, what))
}

fn name(word: Option<&str>) -> Result<String, String> {
    word.map(str::to_string)
        .ok_or_else(|| "missing shape name".to_string())
}

fn point(words: &mut std::str::SplitWhitespace<'_>) -> Result<Point, String> {
    let x = number(words.next(), "x coordinate")?;
    let y = number(words.next(), "y coordinate")?;
    Ok(Point::new(x, y))
}

/// Two optional numbers, both or neither
fn pair(words: &mut std::str::SplitWhitespace<'_>, default: (f64, f64)) -> Result<(f64, f64), String> {
    match words.next() {
        None => Ok(default),
        Some(first) => {
            let a = number(Some(first), "size")?;
            let b = number(words.next(), "size")?;
            Ok((a, b))
        }
    }
}

fn no_more(words: &mut std::str::SplitWhitespace<'_>) -> Result<(), String> {
    match words.next() {
        Some(extra) => Err(format!("unexpected '{}'", extra)),
        None => Ok(()),
    }
}

/// Parse a prompt line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<Request>, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let keyword = keyword.to_ascii_lowercase();
    let request = match keyword.as_str() {
        "new" => Request::NewWindow(name(words.next())?),
        "switch" => Request::SwitchWindow(name(words.next())?),
        "windows" => Request::ListWindows,
        "rect" | "rectangle" => {
            let name = name(words.next())?;
            let center = point(&mut words)?;
            let (w, h) = pair(&mut words, (40.0, 30.0))?;
            Request::Create(Shape::rectangle(name, center, w, h))
        }
        "ellipse" => {
            let name = name(words.next())?;
            let center = point(&mut words)?;
            let (rx, ry) = pair(&mut words, (20.0, 15.0))?;
            Request::Create(Shape::ellipse(name, center, rx, ry))
        }
        "line" => {
            let name = name(words.next())?;
            let center = point(&mut words)?;
            let (dx, dy) = pair(&mut words, (40.0, 0.0))?;
            Request::Create(Shape::line(name, center, dx, dy))
        }
        "polygon" => {
            let name = name(words.next())?;
            let center = point(&mut words)?;
            let (sides, radius) = pair(&mut words, (6.0, 20.0))?;
            if sides < 3.0 || sides > f64::from(MAX_POLYGON_SIDES) || sides.fract() != 0.0 {
                return Err(format!(
                    "a polygon needs a whole number of sides from 3 to {}, got {}",
                    MAX_POLYGON_SIDES, sides
                ));
            }
            Request::Create(Shape::polygon(name, center, sides as u32, radius))
        }
        "text" => {
            let name = name(words.next())?;
            let center = point(&mut words)?;
            let text = words.collect::<Vec<_>>().join(" ");
            return Ok(Some(Request::Create(Shape::text(name, center, text, 12.0))));
        }
        "move" => {
            let name = name(words.next())?;
            let dx = number(words.next(), "dx")?;
            let dy = number(words.next(), "dy")?;
            Request::Move { name, motion: Motion::By { dx, dy } }
        }
        "moveto" => {
            let name = name(words.next())?;
            Request::Move { name, motion: Motion::To(point(&mut words)?) }
        }
        "set" | "edit" => {
            let name = name(words.next())?;
            let attribute = words
                .next()
                .ok_or_else(|| "missing attribute".to_string())?
                .to_string();
            let value = words.collect::<Vec<_>>().join(" ");
            if value.is_empty() {
                return Err("missing value".to_string());
            }
            return Ok(Some(Request::Edit {
                name,
                attribute,
                value: AttributeValue::Text(value),
            }));
        }
        "texture" => {
            let name = name(words.next())?;
            let pattern = match words.next() {
                None => TexturePattern::Hatch,
                Some(word) => TexturePattern::parse(word)
                    .ok_or_else(|| format!("unknown pattern '{}'", word))?,
            };
            Request::Decorate { name, decoration: Decoration::texture(pattern) }
        }
        "shadow" => Request::Decorate {
            name: name(words.next())?,
            decoration: Decoration::shadow(),
        },
        "undecorate" => Request::Undecorate(name(words.next())?),
        "delete" | "rm" => Request::Delete(name(words.next())?),
        "front" | "back" | "forward" | "backward" => {
            let operation = match keyword.as_str() {
                "front" => ZOrderOperation::BringToFront,
                "back" => ZOrderOperation::SendToBack,
                "forward" => ZOrderOperation::BringForward,
                _ => ZOrderOperation::SendBackward,
            };
            Request::Layer {
                name: name(words.next())?,
                target: LayerTarget::Relative(operation),
            }
        }
        "layer" => {
            let name = name(words.next())?;
            let word = words.next().ok_or_else(|| "missing layer index".to_string())?;
            let index = word
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a layer index", word))?;
            Request::Layer { name, target: LayerTarget::Index(index) }
        }
        "select" => Request::Select {
            top_left: point(&mut words)?,
            bottom_right: point(&mut words)?,
        },
        "deselect" => Request::Deselect,
        "paste" => Request::Paste(point(&mut words)?),
        "undo" => Request::Undo,
        "redo" => Request::Redo,
        "depth" => {
            let word = words.next().ok_or_else(|| "missing depth".to_string())?;
            Request::Depth(
                word.parse::<usize>()
                    .map_err(|_| format!("'{}' is not a valid depth", word))?,
            )
        }
        "order" => {
            let word = words.next().ok_or_else(|| "missing ordering".to_string())?;
            Request::Order(word.parse::<OrderingStrategy>().map_err(|e| e.to_string())?)
        }
        "list" | "ls" => Request::List,
        "show" => Request::Show(name(words.next())?),
        "help" | "?" => Request::Help(words.next().map(str::to_string)),
        "save" => Request::Save(PathBuf::from(name(words.next())?)),
        "load" => Request::Load(PathBuf::from(name(words.next())?)),
        "quit" | "exit" => Request::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    no_more(&mut words)?;
    Ok(Some(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::Drawable;

    fn parse(line: &str) -> Request {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert!(parse_line("   ").unwrap().is_none());
    }

    #[test]
    fn test_create_shapes() {
        match parse("rect r1 10 20 5 6") {
            Request::Create(shape) => {
                assert_eq!(shape.unique_name(), "r1");
                assert_eq!(shape.center(), Point::new(10.0, 20.0));
                assert_eq!(shape.attribute("height").unwrap(), AttributeValue::Number(6.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse("text t 1 2 hello  world") {
            Request::Create(shape) => {
                assert_eq!(shape.attribute("text").unwrap(), AttributeValue::Text("hello world".into()));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_line("rect r1 10").is_err());
        assert!(parse_line("rect r1 10 20 5").is_err());
        assert!(parse_line("polygon p 0 0 2 5").is_err());
        assert!(parse_line("polygon p 0 0 1e10 5").is_err());
    }

    #[test]
    fn test_edit_keeps_value_text() {
        match parse("set r1 fill #FF0000") {
            Request::Edit { name, attribute, value } => {
                assert_eq!(name, "r1");
                assert_eq!(attribute, "fill");
                assert_eq!(value, AttributeValue::Text("#FF0000".into()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_layer_requests() {
        assert!(matches!(
            parse("front a"),
            Request::Layer { target: LayerTarget::Relative(ZOrderOperation::BringToFront), .. }
        ));
        assert!(matches!(
            parse("layer a 3"),
            Request::Layer { target: LayerTarget::Index(3), .. }
        ));
        assert!(parse_line("layer a -1").is_err());
    }

    #[test]
    fn test_session_requests() {
        assert!(matches!(parse("order spatial"), Request::Order(OrderingStrategy::Spatial)));
        assert!(matches!(parse("depth 5"), Request::Depth(5)));
        assert!(matches!(parse("help"), Request::Help(None)));
        assert!(parse_line("undo now").is_err());
        assert!(parse_line("frobnicate").is_err());
    }
}
